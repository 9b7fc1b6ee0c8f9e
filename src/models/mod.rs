//! Data models for winmaint.
//!
//! This module contains the data structures shared across the orchestration
//! core:
//! - [`Settings`]: backup pairs, exclusions and runner tuning loaded from `settings.json`
//! - [`Session`]: per-run context carrying the error collector, operation
//!   statuses and the once-only gates for expensive operations
//! - [`ErrorCollector`] / [`ErrorRecord`]: accumulated task failures for the
//!   end-of-run summary

pub mod session;
pub mod settings;

pub use session::{ErrorCollector, ErrorRecord, Session};
pub use settings::{MaintenanceWait, Settings, SettingsError};
