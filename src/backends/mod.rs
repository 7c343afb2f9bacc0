//! Execution backends
//!
//! Every command the shell runs itself belongs to one [`CommandCategory`].
//! The in-process categories are served by a type implementing
//! [`CommandBackend`]; anything unclaimed goes to the external executor.

pub mod file_ops;
pub mod system_monitor;

pub use file_ops::FileOperations;
pub use system_monitor::SystemMonitor;

use crate::error::Result;
use crate::models::DispatchResult;
use std::fmt;
use std::path::Path;

/// Which backend owns a command, in dispatch precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    /// Session built-ins (`cd`, `history`, `exit`, ...)
    Builtin,
    /// Filesystem commands served in-process
    FileOperation,
    /// Process and host telemetry commands served in-process
    SystemMonitor,
    /// Anything else, run as a host process
    External,
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandCategory::Builtin => "builtin",
            CommandCategory::FileOperation => "file_operation",
            CommandCategory::SystemMonitor => "system_monitor",
            CommandCategory::External => "external",
        };
        write!(f, "{}", name)
    }
}

/// An in-process command backend
pub trait CommandBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Command names this backend claims
    fn supported_commands(&self) -> &'static [&'static str];

    /// Whether `command` is claimed by this backend
    fn supports(&self, command: &str) -> bool {
        self.supported_commands().contains(&command)
    }

    /// Run `command` with `args`; relative paths resolve against `cwd`
    fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<DispatchResult>;
}

/// Format a byte count as `1.5K`, `20.0M`, ...
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}P", size)
}

/// Lay out rows in space-separated columns under a header
///
/// Columns whose every cell parses as a number are right-aligned.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(columns) {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let numeric: Vec<bool> = (0..columns)
        .map(|index| {
            !rows.is_empty()
                && rows.iter().all(|row| {
                    row.get(index)
                        .map(|cell| cell.trim_end_matches('%').parse::<f64>().is_ok())
                        .unwrap_or(false)
                })
        })
        .collect();

    let render = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let width = widths[index];
                if numeric[index] {
                    format!("{:>width$}", cell, width = width)
                } else if index + 1 == columns {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(headers.to_vec()));
    for row in rows {
        lines.push(render(
            (0..columns)
                .map(|index| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        ));
    }
    lines.join("\n")
}
