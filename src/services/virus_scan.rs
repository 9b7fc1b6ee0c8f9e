//! Defender quick scan, gated to once per session.
//!
//! A quick scan is expensive enough that composite runs must not repeat it
//! when the user loops through the menu; the session flag records that it
//! already happened and a rerun reports an informational status instead.

use crate::models::Session;
use crate::services::process::{self, Tool};
use anyhow::Result;
use camino::Utf8PathBuf;

/// MpCmdRun lives under Program Files, not on PATH.
fn defender_path() -> Utf8PathBuf {
    let program_files =
        std::env::var("ProgramFiles").unwrap_or_else(|_| r"C:\Program Files".to_string());
    Utf8PathBuf::from(program_files)
        .join("Windows Defender")
        .join("MpCmdRun.exe")
}

pub async fn run(session: &mut Session) -> Result<Vec<String>> {
    if session.virus_scan_completed {
        return Ok(vec![
            "virus scan already performed this session; skipping".to_string(),
        ]);
    }

    let program = defender_path();
    let args = vec!["-Scan".to_string(), "-ScanType".to_string(), "1".to_string()];
    let output = process::run_tool(Tool::DefenderScan, program.as_str(), &args).await?;

    session.virus_scan_completed = true;

    let status = process::describe_exit(Tool::DefenderScan, output.exit_code);
    Ok(vec![status.detail])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_run_is_gated() {
        let mut session = Session::new();
        session.virus_scan_completed = true;

        let lines = run(&mut session).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("already performed this session"));
    }

    #[test]
    fn test_defender_path_points_at_mpcmdrun() {
        assert!(defender_path().as_str().ends_with("MpCmdRun.exe"));
    }
}
