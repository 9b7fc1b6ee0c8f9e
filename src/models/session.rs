use crate::runlog::{ERRORS_STREAM, RunLog, STATUS_STREAM};

/// One recorded task failure, kept for the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub task: String,
    pub error: String,
}

/// Accumulates failure records for one menu iteration.
///
/// An empty task name or message is a bug in the caller, not a runtime
/// condition, and aborts immediately.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    records: Vec<ErrorRecord>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Panics on an empty task name or message.
    pub fn record(&mut self, task: &str, error: &str) {
        assert!(
            !task.trim().is_empty(),
            "ErrorCollector::record called with an empty task name"
        );
        assert!(
            !error.trim().is_empty(),
            "ErrorCollector::record called with an empty error message"
        );

        self.records.push(ErrorRecord {
            task: task.to_string(),
            error: error.to_string(),
        });
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Per-program-run context threaded through the runner and the adapters.
///
/// Holds the error collector and operation statuses (reset at the start of
/// every menu iteration) and the once-only gates for expensive operations
/// (kept for the whole session). An explicit struct instead of process
/// globals so tests can construct independent sessions.
#[derive(Debug, Default)]
pub struct Session {
    pub errors: ErrorCollector,
    statuses: Vec<(String, String)>,

    /// Set once the Defender quick scan has run this session.
    pub virus_scan_completed: bool,

    /// Set once Windows maintenance has been triggered this session.
    pub maintenance_completed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-iteration state. The once-only gates survive; they guard
    /// reruns of idempotent but expensive operations within one session.
    pub fn begin_iteration(&mut self) {
        self.errors.clear();
        self.statuses.clear();
    }

    /// Record a task failure and forward it to the "errors" log stream.
    pub fn record_error(&mut self, runlog: &RunLog, task: &str, message: &str) {
        self.errors.record(task, message);
        runlog.append(ERRORS_STREAM, task, message);
    }

    /// Append one human-readable status line produced by an adapter.
    pub fn push_status(&mut self, task: &str, line: String) {
        self.statuses.push((task.to_string(), line));
    }

    /// Accumulated `(task, status line)` pairs for this iteration.
    pub fn statuses(&self) -> &[(String, String)] {
        &self.statuses
    }

    /// Write all accumulated statuses to the "status" log stream.
    pub fn flush_statuses(&self, runlog: &RunLog) {
        for (task, line) in &self.statuses {
            runlog.append(STATUS_STREAM, task, line);
        }
    }
}
