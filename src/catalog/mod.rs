//! Menu choices and the task lists they expand to.
//!
//! The catalog is pure data: a menu choice maps to an ordered list of
//! [`Task`] values, each a tagged variant carrying only the data its
//! adapter needs. No closures, no captured state - the mapping is trivially
//! testable and the runner dispatches on the variant.

use crate::services::capabilities::{Capabilities, PackageManager};

/// One unit of work in a run.
///
/// Constructed fresh per menu selection and discarded after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    VirusScan,
    Maintenance,
    Backup,
    Repair,
    Update { managers: Vec<PackageManager> },
    Cleanup,
    Optimize,
    Inventory,
    EventLogScan,
}

impl Task {
    /// Display label used in progress output and the summary block.
    pub fn label(&self) -> &'static str {
        match self {
            Task::VirusScan => "Virus scan",
            Task::Maintenance => "Windows maintenance",
            Task::Backup => "Backup",
            Task::Repair => "System repair",
            Task::Update { .. } => "Software update",
            Task::Cleanup => "Disk cleanup",
            Task::Optimize => "Volume optimization",
            Task::Inventory => "System inventory",
            Task::EventLogScan => "Event log analysis",
        }
    }

    /// Identifier used as the FunctionName column in run logs.
    pub fn log_name(&self) -> &'static str {
        match self {
            Task::VirusScan => "virus_scan",
            Task::Maintenance => "maintenance",
            Task::Backup => "backup",
            Task::Repair => "repair",
            Task::Update { .. } => "update",
            Task::Cleanup => "cleanup",
            Task::Optimize => "optimize",
            Task::Inventory => "inventory",
            Task::EventLogScan => "eventlog",
        }
    }
}

/// Numbered menu selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Backup,
    Repair,
    Update,
    Cleanup,
    Optimize,
    Inventory,
    EventLogScan,
    FullMaintenance,
    FullMaintenanceWithBackup,
    Exit,
}

impl MenuChoice {
    /// Menu order.
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::Backup,
        MenuChoice::Repair,
        MenuChoice::Update,
        MenuChoice::Cleanup,
        MenuChoice::Optimize,
        MenuChoice::Inventory,
        MenuChoice::EventLogScan,
        MenuChoice::FullMaintenance,
        MenuChoice::FullMaintenanceWithBackup,
        MenuChoice::Exit,
    ];

    /// Parse user input. Anything but "1"-"10" is an invalid selection,
    /// reported by the front end rather than raised.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Backup),
            "2" => Some(MenuChoice::Repair),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Cleanup),
            "5" => Some(MenuChoice::Optimize),
            "6" => Some(MenuChoice::Inventory),
            "7" => Some(MenuChoice::EventLogScan),
            "8" => Some(MenuChoice::FullMaintenance),
            "9" => Some(MenuChoice::FullMaintenanceWithBackup),
            "10" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::Backup => 1,
            MenuChoice::Repair => 2,
            MenuChoice::Update => 3,
            MenuChoice::Cleanup => 4,
            MenuChoice::Optimize => 5,
            MenuChoice::Inventory => 6,
            MenuChoice::EventLogScan => 7,
            MenuChoice::FullMaintenance => 8,
            MenuChoice::FullMaintenanceWithBackup => 9,
            MenuChoice::Exit => 10,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuChoice::Backup => "Backup (mirror configured directories)",
            MenuChoice::Repair => "System repair (DISM + SFC)",
            MenuChoice::Update => "Software update (package managers)",
            MenuChoice::Cleanup => "Disk cleanup",
            MenuChoice::Optimize => "Volume optimization",
            MenuChoice::Inventory => "System inventory",
            MenuChoice::EventLogScan => "Event log analysis",
            MenuChoice::FullMaintenance => "Full maintenance (no backup)",
            MenuChoice::FullMaintenanceWithBackup => "Full maintenance with backup",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Expand a menu choice into its ordered task list.
///
/// The capability probe result is consulted for update tasks so that the
/// adapter only drives managers that actually resolved at startup. Exit
/// expands to an empty list; the front end handles termination.
pub fn tasks_for(choice: MenuChoice, capabilities: &Capabilities) -> Vec<Task> {
    let update = Task::Update {
        managers: capabilities.package_managers(),
    };

    match choice {
        MenuChoice::Backup => vec![Task::Backup],
        MenuChoice::Repair => vec![Task::Repair],
        MenuChoice::Update => vec![update],
        MenuChoice::Cleanup => vec![Task::Cleanup],
        MenuChoice::Optimize => vec![Task::Optimize],
        MenuChoice::Inventory => vec![Task::Inventory],
        MenuChoice::EventLogScan => vec![Task::EventLogScan],
        MenuChoice::FullMaintenance => vec![
            Task::VirusScan,
            Task::Maintenance,
            Task::Repair,
            update,
            Task::Cleanup,
            Task::Optimize,
            Task::Inventory,
            Task::EventLogScan,
        ],
        MenuChoice::FullMaintenanceWithBackup => vec![
            Task::VirusScan,
            Task::Maintenance,
            Task::Backup,
            Task::Repair,
            update,
            Task::Cleanup,
            Task::Optimize,
            Task::Inventory,
            Task::EventLogScan,
        ],
        MenuChoice::Exit => Vec::new(),
    }
}
