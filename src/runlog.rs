//! Per-day CSV run logs shared across winmaint processes.
//!
//! Every recorded outcome lands in `logs/{stream}-{yyyy-MM-dd}.csv` with a
//! `Timestamp,FunctionName,Message` header. The elevated sub-processes the
//! GUI launcher spawns may all log into the same dated file, so each write
//! takes an OS-level exclusive lock on the file for the duration of that one
//! row. Lock acquisition blocks with no timeout; rows are tiny and the lock
//! is released immediately after the flush.
//!
//! Fields are quoted per RFC 4180 via the `csv` crate, so messages may
//! contain commas, quotes, or newlines and still re-parse as a single row.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::fs::{self, File, OpenOptions};

/// Stream for general task lifecycle events.
pub const EVENTS_STREAM: &str = "events";

/// Stream fed by the error collector.
pub const ERRORS_STREAM: &str = "errors";

/// Stream for failures caught by the task runner.
pub const TASK_ERRORS_STREAM: &str = "task_errors";

/// Stream for end-of-run operation statuses.
pub const STATUS_STREAM: &str = "status";

/// Column headers written to every new log file.
pub const LOG_HEADER: [&str; 3] = ["Timestamp", "FunctionName", "Message"];

/// Append-only CSV run log rooted at a log directory.
///
/// Cheap to clone and to construct; the directory is created lazily on the
/// first write so a missing or unwritable location degrades to skipped
/// writes instead of a startup failure.
#[derive(Debug, Clone)]
pub struct RunLog {
    log_dir: Utf8PathBuf,
}

impl RunLog {
    /// Create a run log rooted at `log_dir`.
    pub fn new<P: AsRef<Utf8Path>>(log_dir: P) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
        }
    }

    /// Append one row to a stream's dated file.
    ///
    /// Logging failures (directory cannot be created, file unwritable) are
    /// reported and the write is skipped; the caller always continues.
    pub fn append(&self, stream: &str, function: &str, message: &str) {
        if let Err(e) = self.try_append(stream, function, message) {
            tracing::error!("Run log write to stream '{}' skipped: {:#}", stream, e);
        }
    }

    /// Fallible variant of [`append`](Self::append), used directly by tests.
    pub fn try_append(&self, stream: &str, function: &str, message: &str) -> Result<()> {
        fs::create_dir_all(&self.log_dir)
            .with_context(|| format!("Failed to create log directory: {}", self.log_dir))?;

        let path = self.stream_path(stream);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path))?;

        // Exclusive lock for the single write. Blocking acquire: a
        // contending writer waits until the current row is flushed.
        file.lock()
            .with_context(|| format!("Failed to lock log file: {}", path))?;

        let result = Self::write_row(&file, function, message);
        let _ = file.unlock();
        result.with_context(|| format!("Failed to write log row to {}", path))
    }

    /// Today's file path for a stream.
    pub fn stream_path(&self, stream: &str) -> Utf8PathBuf {
        self.log_dir
            .join(format!("{}-{}.csv", stream, Local::now().format("%Y-%m-%d")))
    }

    /// Root directory for the dated log files.
    pub fn log_dir(&self) -> &Utf8Path {
        &self.log_dir
    }

    fn write_row(file: &File, function: &str, message: &str) -> Result<()> {
        // Decided after locking, so two racing writers cannot both see an
        // empty file and emit the header twice.
        let is_new_file = file.metadata().context("Failed to stat log file")?.len() == 0;

        let mut writer = csv::Writer::from_writer(file);
        if is_new_file {
            writer.write_record(LOG_HEADER)?;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([timestamp.as_str(), function, message])?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_runlog() -> (RunLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (RunLog::new(dir.join("logs")), temp_dir)
    }

    #[test]
    fn test_append_creates_directory_and_header() {
        let (runlog, _temp_dir) = temp_runlog();

        runlog.try_append("events", "backup", "mirrored 3 directories").unwrap();

        let path = runlog.stream_path("events");
        assert!(path.exists());

        let mut reader = csv::Reader::from_path(path.as_std_path()).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(LOG_HEADER.to_vec())
        );
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "backup");
        assert_eq!(&rows[0][2], "mirrored 3 directories");
    }

    #[test]
    fn test_header_written_once() {
        let (runlog, _temp_dir) = temp_runlog();

        runlog.try_append("events", "repair", "first").unwrap();
        runlog.try_append("events", "repair", "second").unwrap();

        let mut reader = csv::Reader::from_path(runlog.stream_path("events").as_std_path()).unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_message_with_commas_and_quotes_round_trips() {
        let (runlog, _temp_dir) = temp_runlog();
        let message = "robocopy: 12 copied, 3 \"extra\" files,\nsee log";

        runlog.try_append("status", "backup", message).unwrap();

        let mut reader = csv::Reader::from_path(runlog.stream_path("status").as_std_path()).unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], message);
    }

    #[test]
    fn test_streams_use_separate_files() {
        let (runlog, _temp_dir) = temp_runlog();

        runlog.try_append("errors", "update", "winget missing").unwrap();
        runlog.try_append("task_errors", "update", "launch failed").unwrap();

        assert_ne!(runlog.stream_path("errors"), runlog.stream_path("task_errors"));
        assert!(runlog.stream_path("errors").exists());
        assert!(runlog.stream_path("task_errors").exists());
    }

    #[test]
    fn test_append_swallows_write_failure() {
        // Point the log directory at a path occupied by a regular file so
        // directory creation fails; append must not panic.
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocked");
        fs::write(&blocker, b"not a directory").unwrap();

        let dir = Utf8PathBuf::try_from(blocker).unwrap();
        let runlog = RunLog::new(&dir);

        runlog.append("events", "cleanup", "never lands");
        assert!(runlog.try_append("events", "cleanup", "still fails").is_err());
    }
}
