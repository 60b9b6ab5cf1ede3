pub mod config;
pub mod host;
pub mod logging;
pub mod plugin;

pub use config::Config;
pub use plugin::Plugin;
