//! Process-level plumbing for the registry server: layered configuration,
//! home directory resolution and logging initialization.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig};
pub use logging::init_logging_from_config;
