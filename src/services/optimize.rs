//! Volume optimization via defrag.
//!
//! `defrag /C /O` optimizes every volume with the method appropriate to its
//! media type (trim for SSDs, defragmentation for spinning disks).

use crate::services::process::{self, Tool};
use anyhow::Result;

pub async fn run() -> Result<Vec<String>> {
    let args = vec!["/C".to_string(), "/O".to_string()];
    let output = process::run_tool(Tool::Defrag, "defrag", &args).await?;
    let status = process::describe_exit(Tool::Defrag, output.exit_code);
    Ok(vec![status.detail])
}
