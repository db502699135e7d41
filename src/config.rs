use log::LevelFilter;
use serde::Deserialize;
use std::{
    env,
    fs::read_to_string,
    net::{IpAddr, Ipv4Addr},
    path::Path,
};

use crate::utils::types::Port;

/// The server version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "TICTAC_CONFIG_JSON";

pub fn load_config() -> Option<Config> {
    // Attempt to load the config from the env
    if let Ok(env) = env::var(CONFIG_ENV_KEY) {
        let config: Config = match serde_json::from_str(&env) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("Failed to load env config (Using default): {:?}", err);
                return None;
            }
        };
        return Some(config);
    }

    // Attempt to load the config from disk
    let file = Path::new("config.json");
    if !file.exists() {
        return None;
    }

    let data = match read_to_string(file) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using defaults): {:?}", err);
            return None;
        }
    };

    let config: Config = match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using default): {:?}", err);
            return None;
        }
    };

    Some(config)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address both servers bind to
    pub host: IpAddr,
    /// Port for the persistent game connections
    pub game_port: Port,
    /// Port for the HTTP room discovery routes
    pub http_port: Port,
    pub logging: LevelFilter,
    /// Directory the log files are written to
    pub logging_dir: String,
    /// Rooms created when the server starts
    pub rooms: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            game_port: 8080,
            http_port: 8081,
            logging: LevelFilter::Info,
            logging_dir: "data/logs".to_string(),
            rooms: vec!["test13".to_string(), "yo".to_string()],
        }
    }
}
