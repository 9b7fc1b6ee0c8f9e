//! External tool adapters - the boundary between the orchestration core and
//! the OS maintenance utilities.
//!
//! Each adapter wraps one facility (mirroring copy, image servicing,
//! package upgrades, cleanup, volume optimization, inventory, event log
//! query), builds a fixed argument template, launches the external process
//! via [`process::run_tool`], and maps its exit code to a status string
//! through the shared table in [`process::describe_exit`].
//!
//! # Exit code is data, not control flow
//!
//! A known non-zero exit code is not an error here: robocopy reporting
//! "extra files detected" or Defender reporting "threats found" is
//! information the user wants, so it comes back as an enumerated
//! [`process::Outcome`] plus status text. Only exceptions during process
//! launch (tool missing, I/O failure) surface as adapter errors and reach
//! the error collector.
//!
//! # Components
//!
//! - [`AdapterExecutor`]: dispatches a [`Task`] variant to its adapter;
//!   the production implementation of [`TaskExecutor`]
//! - [`capabilities`]: startup probe for optional package managers
//! - [`process`]: subprocess plumbing and the shared exit-code table
//! - per-facility adapters: [`backup`], [`repair`], [`update`],
//!   [`cleanup`], [`optimize`], [`inventory`], [`eventlog`],
//!   [`virus_scan`], [`maintenance`]

pub mod backup;
pub mod capabilities;
pub mod cleanup;
pub mod eventlog;
pub mod inventory;
pub mod maintenance;
pub mod optimize;
pub mod process;
pub mod repair;
pub mod update;
pub mod virus_scan;

pub use capabilities::{Capabilities, PackageManager};
pub use process::{Outcome, Tool, ToolError, ToolOutput, ToolStatus};

use crate::catalog::Task;
use crate::models::{Session, Settings};
use crate::runlog::{EVENTS_STREAM, RunLog};
use crate::runner::TaskExecutor;
use anyhow::Result;
use camino::Utf8Path;

/// Production task executor: dispatches each task variant to its adapter.
pub struct AdapterExecutor<'a> {
    settings: &'a Settings,
    runlog: &'a RunLog,
}

impl<'a> AdapterExecutor<'a> {
    pub fn new(settings: &'a Settings, runlog: &'a RunLog) -> Self {
        Self { settings, runlog }
    }
}

impl TaskExecutor for AdapterExecutor<'_> {
    async fn execute(&self, task: &Task, session: &mut Session) -> Result<Vec<String>> {
        self.runlog.append(EVENTS_STREAM, task.log_name(), "started");

        let report_dir = Utf8Path::new(&self.settings.report_dir);
        let result = match task {
            Task::VirusScan => virus_scan::run(session).await,
            Task::Maintenance => {
                maintenance::run(session, &self.settings.maintenance_wait).await
            }
            Task::Backup => backup::run(self.settings).await,
            Task::Repair => repair::run().await,
            Task::Update { managers } => update::run(managers).await,
            Task::Cleanup => cleanup::run().await,
            Task::Optimize => optimize::run().await,
            Task::Inventory => inventory::run(report_dir).await,
            Task::EventLogScan => eventlog::run(report_dir).await,
        };

        let outcome = if result.is_ok() { "completed" } else { "failed" };
        self.runlog.append(EVENTS_STREAM, task.log_name(), outcome);
        result
    }
}
