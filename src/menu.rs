//! Console front end: menu rendering, input, and the end-of-run summary.
//!
//! Pure I/O glue over the catalog and the session - no decisions are made
//! here beyond formatting.

use crate::catalog::MenuChoice;
use crate::models::Session;
use crate::runner::RunStats;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const BLOCK_WIDTH: usize = 64;

pub fn print_banner() {
    println!();
    println!("{}", "═".repeat(BLOCK_WIDTH).cyan());
    println!(
        "  {} v{} - Windows maintenance console",
        crate::APP_NAME.bold(),
        crate::VERSION
    );
    println!("{}", "═".repeat(BLOCK_WIDTH).cyan());
}

pub fn print_menu() {
    println!();
    for choice in MenuChoice::ALL {
        println!(
            "  {:>2}. {}",
            choice.number().to_string().cyan().bold(),
            choice.description()
        );
    }
    print!("\nSelect an option (1-10): ");
    let _ = io::stdout().flush();
}

/// Read one line of input. `None` on EOF (treated like Exit).
pub fn read_choice() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            tracing::warn!("Failed to read menu input: {}", e);
            None
        }
    }
}

pub fn print_invalid_selection(input: &str) {
    println!(
        "{}",
        format!("Invalid selection: {:?}; enter a number from 1 to 10", input.trim()).yellow()
    );
}

/// Bordered end-of-run block: per-task statuses, then collected errors.
pub fn print_summary(session: &Session, stats: RunStats) {
    println!();
    println!("{}", "─".repeat(BLOCK_WIDTH).cyan());
    println!(
        "  Run summary: {} attempted, {} succeeded, {} failed",
        stats.attempted,
        stats.succeeded.to_string().green(),
        if stats.failed > 0 {
            stats.failed.to_string().red().to_string()
        } else {
            stats.failed.to_string()
        }
    );

    if !session.statuses().is_empty() {
        println!();
        for (task, line) in session.statuses() {
            println!("  {} {}", format!("{}:", task).bold(), line);
        }
    }

    if !session.errors.is_empty() {
        println!();
        println!("  {}", "Errors:".red().bold());
        for record in session.errors.records() {
            println!("  {}", format!("{}: {}", record.task, record.error).red());
        }
    }

    println!("{}", "─".repeat(BLOCK_WIDTH).cyan());
}
