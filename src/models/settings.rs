use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while interpreting user settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(
        "backup source/destination lists differ in length ({sources} sources, {destinations} destinations); fix settings.json and rerun"
    )]
    MismatchedBackupPairs { sources: usize, destinations: usize },
}

/// User settings from settings.json.
///
/// Bootstrapped with defaults on first run and read once per session; the
/// user edits the file out-of-band and the program never rewrites a valid
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backup source directories, paired by index with `destinations`.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Backup destination directories, parallel to `sources`.
    #[serde(default)]
    pub destinations: Vec<String>,

    /// File patterns excluded from mirroring (robocopy `/XF` syntax).
    #[serde(default = "default_exclusion_patterns")]
    pub exclusion_patterns: Vec<String>,

    /// Pause between tasks in a composite run, in seconds.
    #[serde(default = "default_task_delay_secs")]
    pub task_delay_secs: u64,

    /// Directory for inventory and event log captures.
    #[serde(default = "default_report_dir")]
    pub report_dir: String,

    #[serde(default)]
    pub maintenance_wait: MaintenanceWait,
}

/// Tuning for the wait loop that polls for maintenance processes after the
/// scheduler has been triggered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceWait {
    /// First poll interval in seconds; doubles per attempt.
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,

    /// Ceiling for the doubled poll interval, in seconds.
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// Give up after this many polls.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Give up after this much total wall-clock time, in seconds.
    #[serde(default = "default_wall_clock_limit_secs")]
    pub wall_clock_limit_secs: u64,
}

impl Default for MaintenanceWait {
    fn default() -> Self {
        Self {
            base_delay_secs: default_base_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            max_attempts: default_max_attempts(),
            wall_clock_limit_secs: default_wall_clock_limit_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: vec![r"C:\Users".to_string()],
            destinations: vec![r"D:\Backup\Users".to_string()],
            exclusion_patterns: default_exclusion_patterns(),
            task_delay_secs: default_task_delay_secs(),
            report_dir: default_report_dir(),
            maintenance_wait: MaintenanceWait::default(),
        }
    }
}

fn default_exclusion_patterns() -> Vec<String> {
    vec![
        "*.tmp".to_string(),
        "Thumbs.db".to_string(),
        "desktop.ini".to_string(),
    ]
}

fn default_task_delay_secs() -> u64 {
    2
}

fn default_report_dir() -> String {
    "reports".to_string()
}

fn default_base_delay_secs() -> u64 {
    2
}

fn default_max_delay_secs() -> u64 {
    64
}

fn default_max_attempts() -> u32 {
    10
}

fn default_wall_clock_limit_secs() -> u64 {
    1800
}

impl Settings {
    /// Source/destination pairs in index order.
    ///
    /// A length mismatch yields one descriptive error and no pairs; the
    /// backup adapter surfaces that instead of guessing a pairing.
    pub fn backup_pairs(&self) -> Result<Vec<(&str, &str)>, SettingsError> {
        if self.sources.len() != self.destinations.len() {
            return Err(SettingsError::MismatchedBackupPairs {
                sources: self.sources.len(),
                destinations: self.destinations.len(),
            });
        }

        Ok(self
            .sources
            .iter()
            .map(String::as_str)
            .zip(self.destinations.iter().map(String::as_str))
            .collect())
    }
}
