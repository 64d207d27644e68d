pub mod config;
pub mod fleet;
pub mod logging;
pub mod registry;
