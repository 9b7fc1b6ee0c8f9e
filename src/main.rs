//! winmaint - Interactive console for Windows maintenance
//!
//! Main entry point for the console application.
//!
//! # Overview
//!
//! This binary crate provides the menu front end for winmaint. It initializes:
//! - Privilege check (refuses to start without administrative rights)
//! - Logging infrastructure (daily file rotation + quiet console output)
//! - Tokio current-thread runtime (subprocess execution is sequential)
//! - Settings bootstrap ([`SettingsManager`])
//! - Capability probe (optional package managers)
//! - CSV run log ([`RunLog`])
//!
//! # Execution Flow
//!
//! 1. Parse CLI arguments (optional menu choice for scripted runs)
//! 2. Verify elevation - exit non-zero if the console is not elevated
//! 3. Initialize logging → logs/winmaint.<date>
//! 4. Load or bootstrap settings.json
//! 5. Probe for package managers once
//! 6. Run one choice (scripted) or loop: print menu, read choice, expand it
//!    through the catalog, execute through the task runner, print summary
//! 7. Exit on choice 10 or EOF
//!
//! # Platform
//!
//! Primary platform: Windows 10/11 (x86_64). The wrapped tools (robocopy,
//! DISM, SFC, Defender, cleanmgr, defrag, wevtutil) ship with Windows.

use anyhow::{Result, bail};
use clap::Parser;
use std::time::Duration;
use winmaint::services::{AdapterExecutor, Capabilities, capabilities};
use winmaint::{
    APP_NAME, MenuChoice, RunLog, Session, SettingsManager, TaskRunner, VERSION, catalog, menu,
};

#[derive(Parser, Debug)]
#[command(
    name = "winmaint",
    version,
    about = "Interactive console for Windows maintenance",
    long_about = "Sequences the built-in Windows maintenance utilities (robocopy, DISM, SFC, \
                  WinGet, Defender, cleanmgr, defrag) behind a numbered menu, with per-task \
                  failure isolation and per-day CSV run logs."
)]
struct Args {
    /// Menu choice (1-10) to run non-interactively
    choice: Option<String>,

    /// Directory holding settings.json
    #[arg(long, default_value = ".")]
    config_dir: String,

    /// Directory for run logs and diagnostics
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Verbose diagnostic logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Before anything else: every wrapped tool needs an elevated console.
    winmaint::privilege::ensure_elevated()?;

    let _guard = winmaint::logging::setup_logging(&args.log_dir, APP_NAME, args.debug)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Adapters run strictly one at a time; a current-thread runtime is all
    // the subprocess plumbing needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let settings_manager = SettingsManager::new(args.config_dir.as_str())?;
    let settings = settings_manager.load_or_init()?;

    let capabilities = capabilities::probe().await;
    tracing::info!(
        "Capability probe finished: {} package manager(s) available",
        capabilities.package_managers().len()
    );

    let runlog = RunLog::new(args.log_dir.as_str());
    let runner = TaskRunner::new(Duration::from_secs(settings.task_delay_secs));
    let executor = AdapterExecutor::new(&settings, &runlog);
    let mut session = Session::new();

    if let Some(input) = args.choice {
        // Scripted single-choice run.
        let Some(choice) = MenuChoice::parse(&input) else {
            menu::print_invalid_selection(&input);
            bail!("invalid menu choice: {}", input.trim());
        };
        if choice != MenuChoice::Exit {
            run_iteration(choice, &capabilities, &mut session, &runner, &executor, &runlog).await;
        }
        return Ok(());
    }

    menu::print_banner();
    loop {
        menu::print_menu();
        let Some(input) = menu::read_choice() else {
            break; // EOF behaves like Exit
        };
        let Some(choice) = MenuChoice::parse(&input) else {
            menu::print_invalid_selection(&input);
            continue;
        };
        if choice == MenuChoice::Exit {
            break;
        }

        run_iteration(choice, &capabilities, &mut session, &runner, &executor, &runlog).await;
    }

    tracing::info!("Session ended");
    Ok(())
}

async fn run_iteration(
    choice: MenuChoice,
    capabilities: &Capabilities,
    session: &mut Session,
    runner: &TaskRunner,
    executor: &AdapterExecutor<'_>,
    runlog: &RunLog,
) {
    session.begin_iteration();

    let tasks = catalog::tasks_for(choice, capabilities);
    tracing::info!(
        "Menu choice {} expands to {} task(s)",
        choice.number(),
        tasks.len()
    );

    let stats = runner.run(&tasks, session, executor, runlog).await;
    session.flush_statuses(runlog);
    menu::print_summary(session, stats);
}
