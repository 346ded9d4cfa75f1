pub mod alarm;
pub mod config;
pub mod logging;
pub mod model;
pub mod transport;
pub mod utils;
