//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Level taken from the resolved configuration
//! - Pretty or JSON output on stderr
//! - Optional daily-rotated JSON log files

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
