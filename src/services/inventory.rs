//! System inventory capture.
//!
//! Runs `systeminfo` and writes the captured output to a dated file under
//! the report directory. An unwritable report directory degrades to a
//! reported status; the inventory run itself still counts.

use crate::services::process::{self, Tool};
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::fs;

/// Today's capture path under `report_dir`.
pub fn report_path(report_dir: &Utf8Path) -> Utf8PathBuf {
    report_dir.join(format!("inventory-{}.txt", Local::now().format("%Y-%m-%d")))
}

pub async fn run(report_dir: &Utf8Path) -> Result<Vec<String>> {
    let output = process::run_tool(Tool::SystemInfo, "systeminfo", &[]).await?;
    let status = process::describe_exit(Tool::SystemInfo, output.exit_code);

    let mut lines = vec![status.detail];

    if let Err(e) = fs::create_dir_all(report_dir) {
        tracing::warn!("Cannot create report directory {}: {}", report_dir, e);
        lines.push(format!(
            "inventory collected but not saved (cannot create {}: {})",
            report_dir, e
        ));
        return Ok(lines);
    }

    let path = report_path(report_dir);
    match fs::write(&path, &output.stdout) {
        Ok(()) => lines.push(format!("inventory written to {}", path)),
        Err(e) => {
            tracing::warn!("Cannot write inventory capture {}: {}", path, e);
            lines.push(format!("inventory collected but not saved ({})", e));
        }
    }

    Ok(lines)
}
