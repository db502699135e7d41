use crate::{
    config::{load_config, VERSION},
    services::game::store::Rooms,
};
use log::{error, info};
use std::{io, sync::Arc};
use tokio::{net::TcpListener, select, signal};

mod config;
mod routes;
mod servers;
mod services;
mod session;
mod utils;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = load_config().unwrap_or_default();

    utils::logging::setup(config.logging, &config.logging_dir);

    info!("Starting tictac-relay v{VERSION}");

    let rooms = Arc::new(Rooms::default());
    for name in &config.rooms {
        rooms.create(name);
    }
    info!("Seeded rooms (Total: {})", rooms.total());

    let game_listener = TcpListener::bind((config.host, config.game_port))
        .await
        .inspect_err(|err| {
            error!("Failed to bind game server (Port: {}): {err}", config.game_port)
        })?;
    info!("Started game server (Port: {})", config.game_port);

    let http_listener = TcpListener::bind((config.host, config.http_port))
        .await
        .inspect_err(|err| {
            error!("Failed to bind HTTP server (Port: {}): {err}", config.http_port)
        })?;
    info!("Started HTTP server (Port: {})", config.http_port);

    utils::logging::log_connection_urls(config.game_port, config.http_port);

    select! {
        _ = servers::game::start_server(game_listener, rooms.clone()) => {},
        result = servers::http::start_server(http_listener, rooms) => { result? },
        _ = signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
