use indexmap::IndexMap;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;

/// External tools the adapters shell out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Robocopy,
    Dism,
    Sfc,
    DefenderScan,
    Winget,
    Choco,
    Scoop,
    Npm,
    CleanMgr,
    Defrag,
    SystemInfo,
    Wevtutil,
    MSched,
    Tasklist,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Robocopy => "robocopy",
            Tool::Dism => "DISM",
            Tool::Sfc => "SFC",
            Tool::DefenderScan => "MpCmdRun",
            Tool::Winget => "winget",
            Tool::Choco => "choco",
            Tool::Scoop => "scoop",
            Tool::Npm => "npm",
            Tool::CleanMgr => "cleanmgr",
            Tool::Defrag => "defrag",
            Tool::SystemInfo => "systeminfo",
            Tool::Wevtutil => "wevtutil",
            Tool::MSched => "MSchedExe",
            Tool::Tasklist => "tasklist",
        }
    }
}

/// Broad classification of a mapped exit code.
///
/// Known non-zero exit codes are data, not control flow: an adapter reports
/// the mapped status and keeps going. Only launch failures become errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Partial,
    Failure,
}

/// Human-readable status mapped from a tool's exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub outcome: Outcome,
    pub detail: String,
}

/// Errors that can occur while driving an external process.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of one external process invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Run one external tool to completion, capturing its output.
///
/// The process is awaited with no timeout: the wrapped maintenance tools
/// legitimately run for a long time, and stopping them is a job for the
/// user, not this harness. A launch failure (tool missing, I/O error) is
/// the only error path; the exit code comes back as data.
pub async fn run_tool(tool: Tool, program: &str, args: &[String]) -> Result<ToolOutput, ToolError> {
    tracing::info!("Executing {}: {} {}", tool.name(), program, args.join(" "));

    let start = Instant::now();
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| ToolError::Launch {
            tool: tool.name(),
            source,
        })?;

    let duration = start.elapsed();
    let exit_code = output.status.code().unwrap_or(-1);

    tracing::info!(
        "{} completed in {:.2}s with exit code {}",
        tool.name(),
        duration.as_secs_f32(),
        exit_code
    );

    Ok(ToolOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration,
    })
}

/// Map a tool's exit code to a status string.
///
/// One shared table instead of a mapping per adapter; robocopy is decoded
/// separately because its exit code is a bitmask rather than an enumeration.
pub fn describe_exit(tool: Tool, code: i32) -> ToolStatus {
    if tool == Tool::Robocopy {
        return describe_robocopy_exit(code);
    }

    match exit_table().get(&(tool, code)) {
        Some((outcome, detail)) => ToolStatus {
            outcome: *outcome,
            detail: (*detail).to_string(),
        },
        None => ToolStatus {
            outcome: Outcome::Failure,
            detail: format!("{} exited with unrecognized code {}", tool.name(), code),
        },
    }
}

/// Robocopy exit codes 0-7 are a bitmask of informational conditions;
/// 8 and above indicate copy failures. Canonical mapping: everything below
/// 8 is success or partial success with enumerated caveats, 8+ is a serious
/// error status (still data - the adapter records no failure for it).
fn describe_robocopy_exit(code: i32) -> ToolStatus {
    if code >= 8 || code < 0 {
        return ToolStatus {
            outcome: Outcome::Failure,
            detail: format!(
                "robocopy reported a serious error (code {}); some files or directories could not be copied",
                code
            ),
        };
    }
    if code == 0 {
        return ToolStatus {
            outcome: Outcome::Success,
            detail: "already in sync; no files needed copying".to_string(),
        };
    }

    let mut caveats = Vec::new();
    if code & 1 != 0 {
        caveats.push("files copied");
    }
    if code & 2 != 0 {
        caveats.push("extra files or directories detected in destination");
    }
    if code & 4 != 0 {
        caveats.push("mismatched files or directories detected");
    }

    ToolStatus {
        outcome: if code == 1 { Outcome::Success } else { Outcome::Partial },
        detail: caveats.join(", "),
    }
}

type ExitTable = IndexMap<(Tool, i32), (Outcome, &'static str)>;

fn exit_table() -> &'static ExitTable {
    static TABLE: OnceLock<ExitTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        IndexMap::from([
            (
                (Tool::Dism, 0),
                (Outcome::Success, "image servicing completed successfully"),
            ),
            (
                (Tool::Dism, 3010),
                (Outcome::Partial, "image servicing completed; restart required"),
            ),
            (
                (Tool::Dism, 87),
                (Outcome::Failure, "DISM rejected the command line"),
            ),
            (
                (Tool::Dism, 50),
                (Outcome::Failure, "DISM cannot service the running image"),
            ),
            (
                (Tool::Sfc, 0),
                (
                    Outcome::Success,
                    "integrity check completed; violations repaired or none found",
                ),
            ),
            (
                (Tool::Sfc, 1),
                (Outcome::Failure, "SFC could not perform the requested operation"),
            ),
            (
                (Tool::DefenderScan, 0),
                (Outcome::Success, "quick scan completed; no threats found"),
            ),
            (
                (Tool::DefenderScan, 2),
                (Outcome::Partial, "quick scan found threats; see Defender history"),
            ),
            (
                (Tool::Winget, 0),
                (Outcome::Success, "package upgrades completed"),
            ),
            (
                (Tool::Winget, -1978335189),
                (Outcome::Success, "no applicable package updates found"),
            ),
            ((Tool::Choco, 0), (Outcome::Success, "package upgrades completed")),
            (
                (Tool::Choco, 3010),
                (Outcome::Partial, "package upgrades completed; restart required"),
            ),
            ((Tool::Scoop, 0), (Outcome::Success, "package updates completed")),
            ((Tool::Npm, 0), (Outcome::Success, "global package updates completed")),
            (
                (Tool::CleanMgr, 0),
                (Outcome::Success, "disk cleanup completed"),
            ),
            (
                (Tool::Defrag, 0),
                (Outcome::Success, "volume optimization completed"),
            ),
            (
                (Tool::Defrag, 1),
                (Outcome::Failure, "defrag rejected the command line"),
            ),
            (
                (Tool::SystemInfo, 0),
                (Outcome::Success, "system inventory collected"),
            ),
            (
                (Tool::Wevtutil, 0),
                (Outcome::Success, "event log query completed"),
            ),
            (
                (Tool::MSched, 0),
                (Outcome::Success, "Windows maintenance triggered"),
            ),
            ((Tool::Tasklist, 0), (Outcome::Success, "process list captured")),
        ])
    })
}
