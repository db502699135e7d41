pub mod logging;
pub mod types;
