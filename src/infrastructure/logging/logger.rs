use super::config::{LogConfig, LogFormat};
use std::io;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::domain::models::LogLevel;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger implementation using tracing
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Install the process-wide subscriber
    ///
    /// Logs always go to stderr so command output on stdout stays
    /// machine-readable. When `log_dir` is set a daily-rotated JSON file is
    /// written as well; keep the returned value alive for the whole run so
    /// buffered lines are flushed.
    ///
    /// If a subscriber is already installed (tests, repeated calls) the
    /// existing one is kept.
    pub fn init(config: &LogConfig) -> Self {
        let level = to_tracing_level(config.level);
        let mut layers: Vec<BoxedLayer> = Vec::new();

        let stderr_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true)
                .with_current_span(true)
                .with_filter(env_filter(level))
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(env_filter(level))
                .boxed(),
        };
        layers.push(stderr_layer);

        let guard = config.log_dir.as_ref().map(|log_dir| {
            let file_appender = rolling::daily(log_dir, "batchmint.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            layers.push(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter(level))
                    .boxed(),
            );
            guard
        });

        match tracing_subscriber::registry().with(layers).try_init() {
            Ok(()) => tracing::debug!(
                level = %config.level,
                format = ?config.format,
                file_output = config.log_dir.is_some(),
                "logger initialized"
            ),
            Err(err) => tracing::debug!(error = %err, "logger already initialized"),
        }

        Self { _guard: guard }
    }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

/// Map the configured severity to a tracing level
pub const fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
