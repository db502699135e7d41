use crate::{services::game::store::Rooms, session::Session};
use log::{debug, error};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Starts the game server which accepts the persistent player
/// connections, each connection is handled by its own session
pub async fn start_server(listener: TcpListener, rooms: Arc<Rooms>) {
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(value) => value,
            Err(err) => {
                error!("Failed to accept game connection: {err:?}");
                continue;
            }
        };

        let session_id = Session::acquire_id();
        debug!("Accepted game connection (SID: {session_id}, Addr: {addr})");

        Session::start(session_id, stream, rooms.clone());
    }
}
