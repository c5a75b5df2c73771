//! This crate provides logging initialization for the api-resolver tool.
//!
//! It supports two modes:
//! - CLI mode: logs to STDERR (keeps STDOUT clean for the resolved schema).
//! - File mode: logs to STDERR and to a rolling file at the given path.
//!
//! File logs are rolled over when they reach 5 MB. Rotated logs are
//! compressed. The maximum number of rotated logs is 20.

use anyhow::Result;
use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt::writer::MakeWriterExt};

const MAX_LOG_FILE_BYTES: usize = 5 * 1024 * 1024;
const MAX_ROTATED_LOGS: usize = 20;

pub enum LogMode {
    Cli,
    File(PathBuf),
}

/// Guard that keeps background logging workers alive.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn rotating_writer(path: PathBuf) -> Result<FileRotate<AppendCount>> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(FileRotate::new(
        path,
        AppendCount::new(MAX_ROTATED_LOGS),
        ContentLimit::Bytes(MAX_LOG_FILE_BYTES),
        Compression::OnRotate(1),
        None,
    ))
}

pub fn init(mode: LogMode, verbose: bool) -> Result<Option<LoggingGuards>> {
    let filter = filter(verbose);

    match mode {
        LogMode::Cli => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
        LogMode::File(path) => {
            let writer = rotating_writer(path)?;
            let (file_non_blocking, file_guard) = tracing_appender::non_blocking(writer);
            // Drop lines over the buffer limit instead of blocking when nobody
            // drains stderr.
            let (stderr_non_blocking, stderr_guard) = NonBlockingBuilder::default()
                .lossy(true)
                .buffered_lines_limit(10_000)
                .finish(std::io::stderr());

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(
                    file_non_blocking
                        .with_max_level(tracing::Level::INFO)
                        .and(stderr_non_blocking),
                )
                .with_ansi(false)
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![file_guard, stderr_guard],
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_rotating_writer_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("logs").join("resolver.log");

        let mut writer = rotating_writer(path.clone()).expect("Failed to create writer");
        writer.write_all(b"resolved\n").expect("Failed to write log line");
        writer.flush().expect("Failed to flush log file");

        assert!(path.exists());
    }
}
