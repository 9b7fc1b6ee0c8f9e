// winmaint - Interactive console for Windows maintenance
//
// This is the library crate containing the orchestration core and the
// external-tool adapters. The binary crate (main.rs) provides the console
// menu entry point.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod menu;
pub mod models;
pub mod privilege;
pub mod runlog;
pub mod runner;
pub mod services;

// Re-export commonly used types for convenience
pub use catalog::{MenuChoice, Task};
pub use config::SettingsManager;
pub use models::{ErrorCollector, ErrorRecord, Session, Settings};
pub use runlog::RunLog;
pub use runner::{RunStats, TaskExecutor, TaskRunner};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
