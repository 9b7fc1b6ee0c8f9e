//! Backup via robocopy mirroring.
//!
//! One robocopy invocation per configured source/destination pair, in index
//! order. Exit codes below 8 are informational (robocopy reports what it
//! did through the code) and are surfaced as status text; only a launch
//! failure is an adapter error.

use crate::models::Settings;
use crate::services::process::{self, Tool};
use anyhow::Result;
use camino::Utf8Path;
use std::fs;

/// Mirror arguments for one pair.
///
/// `/MIR` mirrors the tree, retries are kept short so an offline
/// destination fails the pair quickly instead of hanging the run, and the
/// per-file and directory listings are suppressed to keep the console
/// readable. Exclusion patterns apply to file names via `/XF`.
pub fn build_mirror_args(source: &str, destination: &str, exclusions: &[String]) -> Vec<String> {
    let mut args = vec![
        source.to_string(),
        destination.to_string(),
        "/MIR".to_string(),
        "/R:2".to_string(),
        "/W:5".to_string(),
        "/NP".to_string(),
        "/NFL".to_string(),
        "/NDL".to_string(),
    ];

    if !exclusions.is_empty() {
        args.push("/XF".to_string());
        args.extend(exclusions.iter().cloned());
    }

    args
}

/// Mirror every configured pair.
///
/// Mismatched source/destination lists produce one descriptive error and
/// zero robocopy invocations. A missing source or an uncreatable
/// destination skips that pair with a reported status; the remaining pairs
/// still run.
pub async fn run(settings: &Settings) -> Result<Vec<String>> {
    let pairs = settings.backup_pairs()?;

    if pairs.is_empty() {
        return Ok(vec![
            "No backup pairs configured; edit settings.json to add sources and destinations"
                .to_string(),
        ]);
    }

    let mut lines = Vec::new();
    for (source, destination) in pairs {
        if !Utf8Path::new(source).exists() {
            tracing::warn!("Backup source missing: {}", source);
            lines.push(format!("{}: skipped (source does not exist)", source));
            continue;
        }

        if let Err(e) = fs::create_dir_all(destination) {
            tracing::warn!("Cannot create backup destination {}: {}", destination, e);
            lines.push(format!(
                "{}: skipped (cannot create destination: {})",
                destination, e
            ));
            continue;
        }

        let args = build_mirror_args(source, destination, &settings.exclusion_patterns);
        let output = process::run_tool(Tool::Robocopy, "robocopy", &args).await?;
        let status = process::describe_exit(Tool::Robocopy, output.exit_code);
        lines.push(format!("{} -> {}: {}", source, destination, status.detail));
    }

    Ok(lines)
}
