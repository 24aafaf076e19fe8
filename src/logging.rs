//! Logging configuration using tracing

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LOG_FILE_NAME, data_dir, log_path};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "FLUTTER_SDK_RESOLVER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Initialize the logging subsystem
///
/// Logs go to stderr and to a daily rotated file in the data directory.
/// Log level is controlled by the `FLUTTER_SDK_RESOLVER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// FLUTTER_SDK_RESOLVER_LOG=debug flutter-sdk-resolver .
/// ```
pub fn init() -> anyhow::Result<()> {
    let log_dir = data_dir();
    std::fs::create_dir_all(&log_dir)?;

    tracing_subscriber::registry()
        .with(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender(&log_dir))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!("Logging to {} (rotated daily)", log_path().display());

    Ok(())
}

fn file_appender(log_dir: &Path) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME)
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
