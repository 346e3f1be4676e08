use std::path::PathBuf;

use crate::domain::models::LogLevel;

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Default verbosity; `RUST_LOG` directives refine it
    pub level: LogLevel,

    /// Output format for the stderr stream
    pub format: LogFormat,

    /// Directory for daily-rotated JSON log files (optional, stderr only if None)
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}
