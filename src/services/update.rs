//! Software update via the package managers found at startup.
//!
//! The capability probe decides which managers this task drives; each one
//! gets a single unattended upgrade invocation, in probe order. Exit codes
//! are surfaced per manager as status text.

use crate::services::capabilities::PackageManager;
use crate::services::process;
use anyhow::Result;

pub async fn run(managers: &[PackageManager]) -> Result<Vec<String>> {
    if managers.is_empty() {
        return Ok(vec![
            "No supported package manager detected; skipping software update".to_string(),
        ]);
    }

    let mut lines = Vec::new();
    for manager in managers {
        let args = manager.upgrade_args();
        let output = process::run_tool(manager.tool(), manager.command(), &args).await?;
        let status = process::describe_exit(manager.tool(), output.exit_code);
        lines.push(format!("{}: {}", manager.label(), status.detail));
    }

    Ok(lines)
}
