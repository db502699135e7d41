pub mod game;
pub mod http;
