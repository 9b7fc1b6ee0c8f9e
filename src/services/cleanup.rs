//! Disk cleanup via the Windows Clean Manager.
//!
//! Runs the saved cleanup profile 1 (`cleanmgr /sagerun:1`); the profile is
//! configured once by the user with `cleanmgr /sageset:1`.

use crate::services::process::{self, Tool};
use anyhow::Result;

pub async fn run() -> Result<Vec<String>> {
    let output = process::run_tool(Tool::CleanMgr, "cleanmgr", &["/sagerun:1".to_string()]).await?;
    let status = process::describe_exit(Tool::CleanMgr, output.exit_code);
    Ok(vec![status.detail])
}
