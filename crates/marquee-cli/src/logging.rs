//! File-based logging.
//!
//! stdout belongs to the interactive view, so logs go to a daily rotating file
//! under the platform data directory (or `--log-dir`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "marquee";
const DEFAULT_FILTER: &str = "marquee=info,marquee_core=info,marquee_api=info,warn";
const VERBOSE_FILTER: &str = "marquee=debug,marquee_core=debug,marquee_api=debug,warn";

pub fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "marquee")
        .map(|d| d.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// The returned guard flushes buffered lines on drop; hold it for the
/// lifetime of the program.
pub fn init_logging(log_dir: &Path, verbose: bool) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "Logging initialized");
    Ok(guard)
}
