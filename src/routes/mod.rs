use axum::{routing::get, Router};

mod rooms;

/// Creates the router for the room discovery routes, the room
/// registry is expected to be provided as an extension layer
pub fn router() -> Router {
    Router::new().route("/rooms", get(rooms::get_rooms).post(rooms::create_room))
}
