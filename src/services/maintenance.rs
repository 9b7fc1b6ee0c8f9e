//! Windows automatic maintenance: trigger and wait.
//!
//! Triggers the maintenance scheduler once per session, then polls the
//! process list for known maintenance executables with exponential backoff
//! (base 2, capped) until they disappear, the attempt budget runs out, or
//! the wall-clock limit passes. Giving up is non-fatal: the wait exists to
//! keep later tasks from competing with maintenance I/O, not to guarantee
//! completion.

use crate::models::{MaintenanceWait, Session};
use crate::services::process::{self, Tool, ToolError};
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Executables that indicate automatic maintenance is still running.
const MAINTENANCE_PROCESSES: [&str; 4] =
    ["MSchedExe.exe", "TiWorker.exe", "cleanmgr.exe", "defrag.exe"];

/// First field of a `tasklist /FO CSV /NH` row is the quoted image name.
fn image_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^"([^"]+)""#).expect("Invalid image name regex"))
}

/// Extract image names from tasklist CSV output.
pub fn parse_image_names(tasklist_csv: &str) -> Vec<String> {
    tasklist_csv
        .lines()
        .filter_map(|line| {
            image_name_pattern()
                .captures(line)
                .map(|captures| captures[1].to_string())
        })
        .collect()
}

/// Poll delay for an attempt: base doubled per attempt, capped.
pub fn backoff_delay(wait: &MaintenanceWait, attempt: u32) -> Duration {
    let doubled = wait
        .base_delay_secs
        .saturating_mul(1u64 << attempt.min(16));
    Duration::from_secs(doubled.min(wait.max_delay_secs))
}

pub async fn run(session: &mut Session, wait: &MaintenanceWait) -> Result<Vec<String>> {
    if session.maintenance_completed {
        return Ok(vec![
            "Windows maintenance already triggered this session; skipping".to_string(),
        ]);
    }

    let output =
        process::run_tool(Tool::MSched, "MSchedExe.exe", &["Start".to_string()]).await?;

    session.maintenance_completed = true;

    let status = process::describe_exit(Tool::MSched, output.exit_code);
    let mut lines = vec![status.detail];
    lines.push(wait_for_idle(wait).await);
    Ok(lines)
}

/// Wait until no known maintenance process is running, within the
/// configured attempt and wall-clock budget.
async fn wait_for_idle(wait: &MaintenanceWait) -> String {
    let started = Instant::now();
    let wall_limit = Duration::from_secs(wait.wall_clock_limit_secs);

    for attempt in 0..wait.max_attempts {
        match running_maintenance_processes().await {
            Ok(active) if active.is_empty() => {
                return format!(
                    "maintenance processes finished after {:.0}s",
                    started.elapsed().as_secs_f32()
                );
            }
            Ok(active) => {
                tracing::debug!(
                    "Maintenance still running (attempt {}): {}",
                    attempt + 1,
                    active.join(", ")
                );
            }
            Err(e) => {
                // The poll itself failing must not fail the task.
                tracing::warn!("Could not poll maintenance processes: {}", e);
                return "could not poll maintenance processes; continuing".to_string();
            }
        }

        if started.elapsed() >= wall_limit {
            break;
        }
        tokio::time::sleep(backoff_delay(wait, attempt)).await;
    }

    tracing::info!(
        "Maintenance still running after {:.0}s wait; continuing",
        started.elapsed().as_secs_f32()
    );
    "maintenance still running after wait limit; continuing".to_string()
}

async fn running_maintenance_processes() -> Result<Vec<String>, ToolError> {
    let args = vec!["/FO".to_string(), "CSV".to_string(), "/NH".to_string()];
    let output = process::run_tool(Tool::Tasklist, "tasklist", &args).await?;

    Ok(parse_image_names(&output.stdout)
        .into_iter()
        .filter(|name| {
            MAINTENANCE_PROCESSES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_names() {
        let csv = "\"TiWorker.exe\",\"1234\",\"Services\",\"0\",\"12,345 K\"\n\
                   \"notepad.exe\",\"5678\",\"Console\",\"1\",\"8,000 K\"\n";
        assert_eq!(parse_image_names(csv), vec!["TiWorker.exe", "notepad.exe"]);
    }

    #[test]
    fn test_parse_image_names_skips_malformed_lines() {
        let csv = "INFO: No tasks are running.\n\"defrag.exe\",\"99\"\n";
        assert_eq!(parse_image_names(csv), vec!["defrag.exe"]);
    }

    #[test]
    fn test_backoff_doubles_from_base() {
        let wait = MaintenanceWait {
            base_delay_secs: 2,
            max_delay_secs: 64,
            max_attempts: 10,
            wall_clock_limit_secs: 1800,
        };

        assert_eq!(backoff_delay(&wait, 0), Duration::from_secs(2));
        assert_eq!(backoff_delay(&wait, 1), Duration::from_secs(4));
        assert_eq!(backoff_delay(&wait, 2), Duration::from_secs(8));
        assert_eq!(backoff_delay(&wait, 3), Duration::from_secs(16));
    }

    #[test]
    fn test_backoff_caps_at_ceiling() {
        let wait = MaintenanceWait {
            base_delay_secs: 2,
            max_delay_secs: 64,
            max_attempts: 10,
            wall_clock_limit_secs: 1800,
        };

        assert_eq!(backoff_delay(&wait, 5), Duration::from_secs(64));
        assert_eq!(backoff_delay(&wait, 30), Duration::from_secs(64));
        assert_eq!(backoff_delay(&wait, u32::MAX), Duration::from_secs(64));
    }

    #[tokio::test]
    async fn test_second_trigger_is_gated() {
        let mut session = Session::new();
        session.maintenance_completed = true;

        let wait = MaintenanceWait::default();
        let lines = run(&mut session, &wait).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("already triggered this session"));
    }
}
