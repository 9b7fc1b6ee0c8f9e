//! Event log analysis via wevtutil.
//!
//! Queries the System log for recent critical and error events, counts
//! them, and captures the text rendering to a dated file under the report
//! directory.

use crate::services::process::{self, Tool};
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

/// Maximum events fetched per run.
const MAX_EVENTS: u32 = 100;

/// wevtutil's text rendering starts each record with `Event[n]:`.
fn event_header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^Event\[\d+\]").expect("Invalid event header regex"))
}

/// Count events in a wevtutil text rendering.
pub fn count_events(rendered: &str) -> usize {
    event_header_pattern().find_iter(rendered).count()
}

/// Today's capture path under `report_dir`.
pub fn report_path(report_dir: &Utf8Path) -> Utf8PathBuf {
    report_dir.join(format!("eventlog-{}.txt", Local::now().format("%Y-%m-%d")))
}

fn query_args() -> Vec<String> {
    vec![
        "qe".to_string(),
        "System".to_string(),
        "/q:*[System[(Level=1 or Level=2)]]".to_string(),
        format!("/c:{}", MAX_EVENTS),
        "/rd:true".to_string(),
        "/f:text".to_string(),
    ]
}

pub async fn run(report_dir: &Utf8Path) -> Result<Vec<String>> {
    let args = query_args();
    let output = process::run_tool(Tool::Wevtutil, "wevtutil", &args).await?;

    if output.exit_code != 0 {
        let status = process::describe_exit(Tool::Wevtutil, output.exit_code);
        return Ok(vec![status.detail]);
    }

    let count = count_events(&output.stdout);
    let mut lines = if count == 0 {
        vec!["no recent critical or error events in the System log".to_string()]
    } else {
        vec![format!(
            "{} recent critical/error events found in the System log",
            count
        )]
    };

    if count > 0 {
        if let Err(e) = fs::create_dir_all(report_dir) {
            tracing::warn!("Cannot create report directory {}: {}", report_dir, e);
            lines.push(format!("events not saved (cannot create {}: {})", report_dir, e));
            return Ok(lines);
        }

        let path = report_path(report_dir);
        match fs::write(&path, &output.stdout) {
            Ok(()) => lines.push(format!("events written to {}", path)),
            Err(e) => {
                tracing::warn!("Cannot write event capture {}: {}", path, e);
                lines.push(format!("events not saved ({})", e));
            }
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_events() {
        let rendered = "Event[0]:\n  Log Name: System\n  Level: Error\n\
                        Event[1]:\n  Log Name: System\n  Level: Critical\n";
        assert_eq!(count_events(rendered), 2);
    }

    #[test]
    fn test_count_events_ignores_indented_mentions() {
        let rendered = "Event[0]:\n  Description: mentions Event[9] inline\n";
        assert_eq!(count_events(rendered), 1);
    }

    #[test]
    fn test_count_events_empty() {
        assert_eq!(count_events(""), 0);
    }

    #[test]
    fn test_query_targets_critical_and_error_levels() {
        let args = query_args();
        assert_eq!(args[0], "qe");
        assert_eq!(args[1], "System");
        assert!(args.iter().any(|a| a.contains("Level=1") && a.contains("Level=2")));
        assert!(args.contains(&"/f:text".to_string()));
    }
}
