//! Platform abstraction layer
//!
//! This module provides a unified interface for host facilities (process
//! table, memory, disks, signals, paths), abstracting away differences
//! between Unix flavours. Linux reads `/proc`; other Unix systems report
//! the `/proc`-backed facilities as unsupported.

mod traits;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
compile_error!("plainsh supports Unix platforms only");

pub use traits::*;

use std::path::{Component, Path, PathBuf};

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific signal operations
    pub fn signals() -> Box<dyn SignalOps> {
        Box::new(unix::UnixSignals::new())
    }

    /// Get the platform-specific process table operations
    pub fn processes() -> Box<dyn ProcessOps> {
        Box::new(unix::UnixProcesses::new())
    }

    /// Get the platform-specific memory operations
    pub fn memory() -> Box<dyn MemoryOps> {
        Box::new(unix::UnixMemory::new())
    }

    /// Get the platform-specific system telemetry
    pub fn system() -> Box<dyn SystemOps> {
        Box::new(unix::UnixSystem::new())
    }

    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        Box::new(unix::UnixPaths::new())
    }

    /// Name of the running operating system, for error messages
    pub fn name() -> &'static str {
        std::env::consts::OS
    }
}

/// Resolve a user-supplied path against `base`
///
/// `~` and `~/...` expand to the home directory; relative paths are joined
/// onto `base`. The result is normalized lexically (no symlink resolution).
pub fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let expanded = expand_tilde(raw);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    normalize_path(&joined)
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(raw: &str) -> PathBuf {
    let home = || Platform::paths().home_dir();
    if raw == "~" {
        if let Some(home) = home() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Remove `.` components and fold `..` into its parent
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
