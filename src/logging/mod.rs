//! Application logging functionality
//!
//! Logs go to stderr. When enabled in settings they are also written to a
//! dated file in the logs directory, without ANSI colors.

use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Name of the log file for the current day
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("tofu-{}.log", timestamp)
}

fn file_appender(logs_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(logs_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(current_log_file_name())
        .build(logs_dir)?;
    Ok(appender)
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. Returns the log file path when
/// file logging is active.
pub fn init(level: Level, logs_dir: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, log_file) = match logs_dir {
        Some(dir) => {
            let appender = file_appender(dir)?;
            let layer = fmt::layer().with_ansi(false).with_writer(appender);
            (Some(layer), Some(dir.join(current_log_file_name())))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let name = current_log_file_name();
        assert!(name.starts_with("tofu-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        file_appender(&logs).unwrap();
        assert!(logs.is_dir());
    }
}
