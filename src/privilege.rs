//! Startup privilege detection.
//!
//! Every wrapped tool (DISM, SFC, Optimize-Volume, the maintenance
//! scheduler) requires an elevated console, so the check runs once before
//! any other component initializes and refuses to start without it.

use anyhow::{Context, Result, bail};
use std::process::Command;

/// Refuse to start unless the process has administrative rights.
pub fn ensure_elevated() -> Result<()> {
    let elevated = is_elevated().context("Failed to determine privilege level")?;
    if !elevated {
        bail!(
            "administrative rights are required; restart {} from an elevated console",
            crate::APP_NAME
        );
    }
    tracing::debug!("Privilege check passed");
    Ok(())
}

/// `net session` succeeds only from an elevated console; its output is
/// irrelevant, only the exit status matters.
#[cfg(windows)]
pub fn is_elevated() -> Result<bool> {
    use std::process::Stdio;

    let status = Command::new("net")
        .arg("session")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("Failed to run 'net session'")?;
    Ok(status.success())
}

#[cfg(not(windows))]
pub fn is_elevated() -> Result<bool> {
    let output = Command::new("id")
        .arg("-u")
        .output()
        .context("Failed to run 'id -u'")?;
    Ok(String::from_utf8_lossy(&output.stdout).trim() == "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_elevated_resolves() {
        // The answer depends on how the test process was launched; the
        // probe itself must not error on a normal system.
        assert!(is_elevated().is_ok());
    }
}
