//! Unix process table operations

use crate::error::Result;
use crate::platform::traits::{ProcessInfo, ProcessOps};

pub struct UnixProcesses;

impl UnixProcesses {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessOps for UnixProcesses {
    fn list_processes(&self) -> Result<Vec<ProcessInfo>> {
        #[cfg(target_os = "linux")]
        {
            linux::list_processes()
        }

        #[cfg(not(target_os = "linux"))]
        {
            Err(crate::error::Error::Unsupported {
                feature: "process table".to_string(),
                platform: crate::platform::Platform::name().to_string(),
            })
        }
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::super::procfs;
    use crate::error::{Error, Result};
    use crate::platform::traits::ProcessInfo;
    use chrono::{Local, TimeZone};
    use nix::unistd::{Uid, User};
    use std::collections::HashMap;
    use std::fs;

    /// Walk `/proc` and snapshot every process that is still readable
    pub fn list_processes() -> Result<Vec<ProcessInfo>> {
        let ticks = procfs::clock_ticks();
        let page_size = procfs::page_size();
        let boot_time = procfs::boot_time()?;
        let uptime = procfs::uptime_seconds()?;
        let total_memory = procfs::parse_meminfo(&procfs::read("/proc/meminfo")?)
            .get("MemTotal")
            .map(|kb| kb * 1024)
            .unwrap_or(0);

        let mut users: HashMap<u32, String> = HashMap::new();
        let mut processes = Vec::new();

        for entry in fs::read_dir("/proc").map_err(Error::Io)?.flatten() {
            // Only PID directories (all digits)
            let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u32>().ok())
            else {
                continue;
            };

            // The process may exit between listing and reading
            let Ok(stat_content) = fs::read_to_string(format!("/proc/{}/stat", pid)) else {
                continue;
            };
            let Some(stat) = procfs::parse_stat(&stat_content) else {
                continue;
            };

            let uid = fs::read_to_string(format!("/proc/{}/status", pid))
                .ok()
                .and_then(|status| procfs::parse_status_uid(&status))
                .unwrap_or(0);

            let cmdline = fs::read(format!("/proc/{}/cmdline", pid))
                .map(|raw| {
                    raw.split(|byte| *byte == 0)
                        .filter(|part| !part.is_empty())
                        .map(|part| String::from_utf8_lossy(part).into_owned())
                        .collect()
                })
                .unwrap_or_default();

            let started_after_boot = stat.start_ticks as f64 / ticks as f64;
            let elapsed = uptime - started_after_boot;
            let cpu_seconds = (stat.utime + stat.stime) as f64 / ticks as f64;
            let cpu_percent = if elapsed > 0.0 {
                cpu_seconds / elapsed * 100.0
            } else {
                0.0
            };

            let memory_percent = if total_memory > 0 {
                (stat.rss_pages * page_size) as f64 / total_memory as f64 * 100.0
            } else {
                0.0
            };

            let start_time = Local
                .timestamp_opt(boot_time + started_after_boot as i64, 0)
                .single();

            let user = users
                .entry(uid)
                .or_insert_with(|| user_name(uid))
                .clone();

            processes.push(ProcessInfo {
                pid,
                ppid: stat.ppid,
                name: stat.name,
                cmdline,
                uid,
                user,
                state: stat.state,
                cpu_percent,
                memory_percent,
                start_time,
            });
        }

        processes.sort_by_key(|process| process.pid);
        Ok(processes)
    }

    fn user_name(uid: u32) -> String {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(Some(user)) => user.name,
            _ => uid.to_string(),
        }
    }
}
