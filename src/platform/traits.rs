//! Platform-specific operation traits
//!
//! These traits define the interface for host facilities the system-monitor
//! backend and the shell need, allowing for clean abstraction and easier
//! testing.

use crate::error::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;

/// A snapshot of one running process
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub ppid: u32,
    /// Short executable name
    pub name: String,
    /// Full command line, empty for kernel threads
    pub cmdline: Vec<String>,
    pub uid: u32,
    /// Resolved user name (falls back to the numeric uid)
    pub user: String,
    /// One-letter scheduler state (`R`, `S`, `Z`, ...)
    pub state: String,
    /// CPU time divided by wall time since the process started
    pub cpu_percent: f64,
    /// Resident memory as a share of physical memory
    pub memory_percent: f64,
    pub start_time: Option<DateTime<Local>>,
}

impl ProcessInfo {
    /// Command line if known, else the short name
    pub fn command_line(&self) -> String {
        if self.cmdline.is_empty() {
            self.name.clone()
        } else {
            self.cmdline.join(" ")
        }
    }
}

/// Physical memory and swap, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

impl MemoryInfo {
    pub fn used_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64 * 100.0
        }
    }
}

/// Space on one mounted filesystem, in bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub device: String,
    pub mount_point: PathBuf,
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

/// One logged-in user session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user: String,
    pub terminal: String,
    pub started: Option<DateTime<Local>>,
}

/// Kernel identification as reported by `uname(2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

/// Platform-specific signal operations
pub trait SignalOps: Send + Sync {
    /// Send signal number `signal` to `pid`
    fn send_signal(&self, pid: i32, signal: i32) -> Result<()>;

    /// Check if a process is still running
    fn is_process_running(&self, pid: i32) -> bool;
}

/// Platform-specific process table operations
pub trait ProcessOps: Send + Sync {
    /// Every process visible to the current user
    fn list_processes(&self) -> Result<Vec<ProcessInfo>>;
}

/// Platform-specific memory operations
pub trait MemoryOps: Send + Sync {
    /// System-wide memory and swap usage
    fn memory_info(&self) -> Result<MemoryInfo>;
}

/// Platform-specific system telemetry
pub trait SystemOps: Send + Sync {
    /// Time since boot
    fn uptime(&self) -> Result<Duration>;

    /// 1, 5 and 15 minute load averages
    fn load_average(&self) -> Result<[f64; 3]>;

    /// Aggregate CPU busy share since boot, in percent
    fn cpu_usage(&self) -> Result<f64>;

    /// Usage of every mounted physical filesystem
    fn disk_usage(&self) -> Result<Vec<DiskUsage>>;

    /// Sessions recorded in the login accounting database
    fn logged_in_users(&self) -> Result<Vec<UserSession>>;

    /// Name of the effective user
    fn current_user(&self) -> Result<String>;

    /// Kernel identification
    fn kernel_info(&self) -> Result<KernelInfo>;
}

/// Platform-specific path operations
pub trait PathOps: Send + Sync {
    /// Get configuration directory
    fn config_dir(&self) -> Result<PathBuf>;

    /// Get the user's home directory
    fn home_dir(&self) -> Option<PathBuf>;
}
