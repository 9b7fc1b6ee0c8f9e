//! Sequential task execution with per-task failure isolation.
//!
//! The runner walks a task list in order on the calling context: display
//! progress, execute, record the outcome, pause, next. A failing task never
//! skips or aborts the tasks after it - its error goes to the "task_errors"
//! log stream and the session's error collector, and the walk continues.
//! There is no parallelism and no reordering.
//!
//! Execution is abstracted behind [`TaskExecutor`] so tests can script
//! outcomes without launching external processes.

use crate::catalog::Task;
use crate::models::Session;
use crate::runlog::{RunLog, TASK_ERRORS_STREAM};
use anyhow::Result;
use colored::Colorize;
use std::time::{Duration, Instant};

/// Executes one task, returning its human-readable status lines.
pub trait TaskExecutor {
    async fn execute(&self, task: &Task, session: &mut Session) -> Result<Vec<String>>;
}

/// Counts from one runner invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sequential task runner.
pub struct TaskRunner {
    delay_between_tasks: Duration,
}

impl TaskRunner {
    /// # Arguments
    /// * `delay_between_tasks` - pause after every non-final task, giving
    ///   the user a moment to read the console between tool runs
    pub fn new(delay_between_tasks: Duration) -> Self {
        Self {
            delay_between_tasks,
        }
    }

    /// Run every task in order, exactly once each.
    pub async fn run<E: TaskExecutor>(
        &self,
        tasks: &[Task],
        session: &mut Session,
        executor: &E,
        runlog: &RunLog,
    ) -> RunStats {
        let total = tasks.len();
        let started = Instant::now();
        let mut stats = RunStats::default();

        for (index, task) in tasks.iter().enumerate() {
            println!(
                "{} {}",
                format!("[{}/{}]", index + 1, total).cyan().bold(),
                task.label()
            );
            tracing::info!("Running task {}/{}: {}", index + 1, total, task.label());
            stats.attempted += 1;

            match executor.execute(task, session).await {
                Ok(lines) => {
                    stats.succeeded += 1;
                    for line in lines {
                        println!("    {}", line.as_str().dimmed());
                        session.push_status(task.label(), line);
                    }
                }
                Err(e) => {
                    stats.failed += 1;
                    let message = format!("{:#}", e);
                    tracing::error!("Task '{}' failed: {}", task.label(), message);
                    println!("    {}", format!("failed: {}", message).red());
                    runlog.append(TASK_ERRORS_STREAM, task.log_name(), &message);
                    session.record_error(runlog, task.label(), &message);
                }
            }

            if index + 1 < total && !self.delay_between_tasks.is_zero() {
                tokio::time::sleep(self.delay_between_tasks).await;
            }
        }

        tracing::info!(
            "Run finished: {} attempted, {} succeeded, {} failed in {:.1}s",
            stats.attempted,
            stats.succeeded,
            stats.failed,
            started.elapsed().as_secs_f32()
        );
        stats
    }
}
