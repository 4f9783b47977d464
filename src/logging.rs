//! Tracing setup driven by [`LoggingSettings`].
//!
//! Events go to stderr and, unless disabled, to a launch log named
//! `bases-kanban_<local timestamp>.log` under the app `logs/` directory.
//! Older launch logs beyond the configured count are removed at startup.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use thiserror::Error;
use time::{
    OffsetDateTime, UtcOffset,
    format_description::BorrowedFormatItem,
    macros::format_description,
};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{AppDirError, AppDirs};
use crate::settings::LoggingSettings;

const LOG_FILE_PREFIX: &str = "bases-kanban_";
const LOG_FILE_SUFFIX: &str = ".log";
const CONSOLE_TIME: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const FILE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
const FILE_NAME_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");

/// Set once per process; holds the file writer guard when a file is written.
static INSTALLED: OnceLock<Option<WorkerGuard>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    LogDir(#[from] AppDirError),
    #[error("Failed to prune launch logs in {path}: {source}")]
    Prune { path: PathBuf, source: io::Error },
    #[error("Failed to open log file {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("Failed to format log timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Another tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] SetGlobalDefaultError),
}

/// Install the global subscriber.
///
/// Returns the launch log path when one was opened. Later calls do nothing and
/// return `Ok(None)`; errors leave the process without a subscriber so callers
/// can carry on unlogged.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(None);
    }
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer()
        .with_timer(offset_timer(CONSOLE_TIME))
        .with_target(false)
        .with_writer(io::stderr);

    if !settings.write_file {
        let subscriber = Registry::default().with(filter).with(console);
        tracing::subscriber::set_global_default(subscriber)?;
        let _ = INSTALLED.set(None);
        return Ok(None);
    }

    let dir = AppDirs::resolve()?.logs_dir()?;
    let removed = prune_launch_logs(&dir, settings.keep_files.saturating_sub(1))?;
    let path = dir.join(launch_log_name(now_local_or_utc())?);
    let file = open_append(&path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(offset_timer(FILE_TIME))
        .with_writer(writer);

    let subscriber = Registry::default()
        .with(filter)
        .with(console)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INSTALLED.set(Some(guard));

    tracing::info!(path = %path.display(), removed, "launch log opened");
    Ok(Some(path))
}

fn open_append(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Delete the oldest launch logs in `dir` until at most `keep` remain.
///
/// Launch log names embed a sortable timestamp, so name order is age order.
/// Files that are not launch logs are left alone.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let prune_error = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launch_logs: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(prune_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_launch_log(path))
        .collect();
    if launch_logs.len() <= keep {
        return Ok(0);
    }
    launch_logs.sort();
    let stale = launch_logs.len() - keep;
    for path in &launch_logs[..stale] {
        fs::remove_file(path).map_err(prune_error)?;
    }
    Ok(stale)
}

fn is_launch_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX))
}

fn launch_log_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = now.format(FILE_NAME_TIME)?;
    Ok(format!("{LOG_FILE_PREFIX}{stamp}{LOG_FILE_SUFFIX}"))
}

fn offset_timer(
    format: &'static [BorrowedFormatItem<'static>],
) -> fmt::time::OffsetTime<BorrowedFormatItem<'static>> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, format.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn launch_log_name_embeds_sortable_timestamp() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            launch_log_name(fixed).unwrap(),
            "bases-kanban_2023-11-14_22-13-20.log"
        );
        let later = OffsetDateTime::from_unix_timestamp(1_700_000_061).unwrap();
        assert!(launch_log_name(fixed).unwrap() < launch_log_name(later).unwrap());
    }

    #[test]
    fn prune_removes_oldest_launch_logs_only() {
        let dir = tempdir().unwrap();
        for day in 1..=5 {
            let name = format!("bases-kanban_2024-01-0{day}_09-00-00.log");
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::write(dir.path().join("other.log"), "").unwrap();
        fs::write(dir.path().join("bases-kanban_notes.txt"), "").unwrap();

        let removed = prune_launch_logs(dir.path(), 2).unwrap();

        assert_eq!(removed, 3);
        assert!(!dir.path().join("bases-kanban_2024-01-03_09-00-00.log").exists());
        assert!(dir.path().join("bases-kanban_2024-01-04_09-00-00.log").exists());
        assert!(dir.path().join("bases-kanban_2024-01-05_09-00-00.log").exists());
        assert!(dir.path().join("other.log").exists());
        assert!(dir.path().join("bases-kanban_notes.txt").exists());
    }

    #[test]
    fn prune_below_limit_keeps_everything() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bases-kanban_2024-01-01_09-00-00.log"), "").unwrap();
        assert_eq!(prune_launch_logs(dir.path(), 1).unwrap(), 0);
    }
}
