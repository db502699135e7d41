use crate::{routes, services::game::store::Rooms};
use axum::Extension;
use std::{io, sync::Arc};
use tokio::net::TcpListener;

/// Starts the HTTP server serving the room discovery routes
pub async fn start_server(listener: TcpListener, rooms: Arc<Rooms>) -> io::Result<()> {
    let router = routes::router().layer(Extension(rooms));
    axum::serve(listener, router).await
}
