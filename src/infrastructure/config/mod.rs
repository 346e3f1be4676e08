//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - JSON file loading, created with defaults on first use
//! - Command-line overrides
//! - Validation of enumerated values and endpoint URLs
//! - `config get|set|list` editing

pub mod loader;
pub mod store;

pub use loader::{default_config_path, ConfigError, ConfigLoader};
pub use store::{ConfigKey, ConfigStore};
