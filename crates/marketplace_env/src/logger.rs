//!
//! Setup of the logging subsystem.
//!

use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Re-exported macros so call sites read `logger::info!(...)`.
pub use tracing::{debug, error, info, instrument, warn};

/// Logging configuration, deserialized from the application settings.
#[derive(Clone, Debug, Deserialize)]
pub struct LogConfig {
    /// Filter directive for console output, e.g. `marketplace=debug,info`.
    #[serde(default = "default_filter")]
    pub console_filter: String,
    /// Optional rolling file output.
    pub file: Option<FileLogConfig>,
}

/// Daily-rolling file log settings.
#[derive(Clone, Debug, Deserialize)]
pub struct FileLogConfig {
    /// Directory the log files are written to.
    pub path: String,
    /// File name prefix.
    pub file_name: String,
    /// Filter directive for the file layer.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_filter: default_filter(),
            file: None,
        }
    }
}

/// Guard keeping the non-blocking writers alive; drop it last.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Set up the logging subsystem from config. Must be called once, early.
pub fn setup(config: &LogConfig) -> TelemetryGuard {
    let mut guards = Vec::new();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&config.console_filter)
                .unwrap_or_else(|_| EnvFilter::new(default_filter()))
        }));

    let file_layer = config.file.as_ref().map(|file_config| {
        let appender = tracing_appender::rolling::daily(&file_config.path, &file_config.file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(
                EnvFilter::try_new(&file_config.filter)
                    .unwrap_or_else(|_| EnvFilter::new(default_filter())),
            )
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    TelemetryGuard {
        _log_guards: guards,
    }
}
