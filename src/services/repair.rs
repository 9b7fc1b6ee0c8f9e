//! System repair via DISM image servicing and SFC.
//!
//! DISM runs as an escalating chain - CheckHealth, ScanHealth,
//! RestoreHealth - and stops as soon as a step reports the component store
//! healthy. This is a three-state escalation, not a retry loop: each step
//! is strictly more invasive than the one before it. SFC runs afterwards
//! either way, as the final integrity pass.

use crate::services::process::{self, Tool};
use anyhow::Result;

/// Printed by DISM when a step finds nothing to repair.
const HEALTHY_MARKER: &str = "No component store corruption detected";

const DISM_STEPS: [(&str, &[&str]); 3] = [
    ("CheckHealth", &["/Online", "/Cleanup-Image", "/CheckHealth"]),
    ("ScanHealth", &["/Online", "/Cleanup-Image", "/ScanHealth"]),
    (
        "RestoreHealth",
        &["/Online", "/Cleanup-Image", "/RestoreHealth"],
    ),
];

pub async fn run() -> Result<Vec<String>> {
    let mut lines = Vec::new();

    for (step, step_args) in DISM_STEPS {
        let args: Vec<String> = step_args.iter().map(|s| s.to_string()).collect();
        let output = process::run_tool(Tool::Dism, "dism", &args).await?;
        let status = process::describe_exit(Tool::Dism, output.exit_code);
        lines.push(format!("DISM {}: {}", step, status.detail));

        if output.exit_code == 0 && output.stdout.contains(HEALTHY_MARKER) {
            tracing::info!("Component store healthy after {}", step);
            lines.push(format!(
                "Component store healthy after {}; skipping further servicing",
                step
            ));
            break;
        }
    }

    let output = process::run_tool(Tool::Sfc, "sfc", &["/scannow".to_string()]).await?;
    let status = process::describe_exit(Tool::Sfc, output.exit_code);
    lines.push(format!("SFC: {}", status.detail));

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_order() {
        let steps: Vec<&str> = DISM_STEPS.iter().map(|(name, _)| *name).collect();
        assert_eq!(steps, vec!["CheckHealth", "ScanHealth", "RestoreHealth"]);
    }

    #[test]
    fn test_steps_target_online_image() {
        for (_, args) in DISM_STEPS {
            assert_eq!(args[0], "/Online");
            assert_eq!(args[1], "/Cleanup-Image");
        }
    }
}
