/// Database configuration and connection management
pub mod database;

/// Settings file and environment overrides
pub mod settings;

pub use settings::{AppConfig, BackendKind, load_config, load_default_config};
