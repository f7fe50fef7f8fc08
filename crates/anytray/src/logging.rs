//! Tracing setup: console output plus a daily log file in the data directory.

use crate::config::Config;

use tracing::warn;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "anytray=info,anytray_core=info";
const LOG_FILE_PREFIX: &str = "anytray";
const LOG_FILE_SUFFIX: &str = "log";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub(crate) fn init() -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let appender = Config::project_dirs().map_err(|e| e.to_string()).and_then(|dirs| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .build(dirs.data_dir().join("logs"))
            .map_err(|e| e.to_string())
    });

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter())
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();

            Some(guard)
        }
        Err(reason) => {
            tracing_subscriber::fmt().with_env_filter(filter()).init();
            warn!(reason = %reason, "Log file unavailable, logging to console only");
            None
        }
    }
}
