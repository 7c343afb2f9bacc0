//! Unix system telemetry: uptime, load, disks, users and kernel identity

use crate::error::{Error, Result};
use crate::platform::traits::{DiskUsage, KernelInfo, SystemOps, UserSession};
use nix::unistd::{geteuid, User};
use std::time::Duration;

pub struct UnixSystem;

impl UnixSystem {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_os = "linux"))]
fn unsupported<T>(feature: &str) -> Result<T> {
    Err(Error::Unsupported {
        feature: feature.to_string(),
        platform: crate::platform::Platform::name().to_string(),
    })
}

impl SystemOps for UnixSystem {
    fn uptime(&self) -> Result<Duration> {
        #[cfg(target_os = "linux")]
        {
            Ok(Duration::from_secs_f64(super::procfs::uptime_seconds()?))
        }

        #[cfg(not(target_os = "linux"))]
        {
            unsupported("uptime")
        }
    }

    fn load_average(&self) -> Result<[f64; 3]> {
        #[cfg(target_os = "linux")]
        {
            let content = super::procfs::read("/proc/loadavg")?;
            parse_loadavg(&content)
                .ok_or_else(|| Error::Other("Failed to parse /proc/loadavg".to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            unsupported("load average")
        }
    }

    fn cpu_usage(&self) -> Result<f64> {
        #[cfg(target_os = "linux")]
        {
            let content = super::procfs::read("/proc/stat")?;
            parse_cpu_busy(&content)
                .ok_or_else(|| Error::Other("Failed to parse /proc/stat".to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            unsupported("CPU usage")
        }
    }

    fn disk_usage(&self) -> Result<Vec<DiskUsage>> {
        #[cfg(target_os = "linux")]
        {
            linux_disk_usage()
        }

        #[cfg(not(target_os = "linux"))]
        {
            unsupported("disk usage")
        }
    }

    fn logged_in_users(&self) -> Result<Vec<UserSession>> {
        #[cfg(target_os = "linux")]
        {
            super::utmp::read_sessions().map_err(Error::Io)
        }

        #[cfg(not(target_os = "linux"))]
        {
            unsupported("login records")
        }
    }

    fn current_user(&self) -> Result<String> {
        let uid = geteuid();
        match User::from_uid(uid)? {
            Some(user) => Ok(user.name),
            None => Ok(uid.to_string()),
        }
    }

    fn kernel_info(&self) -> Result<KernelInfo> {
        let uts = nix::sys::utsname::uname()?;
        let text = |value: &std::ffi::OsStr| value.to_string_lossy().into_owned();

        Ok(KernelInfo {
            sysname: text(uts.sysname()),
            nodename: text(uts.nodename()),
            release: text(uts.release()),
            version: text(uts.version()),
            machine: text(uts.machine()),
        })
    }
}

/// First three fields of `/proc/loadavg`
#[cfg(any(target_os = "linux", test))]
fn parse_loadavg(content: &str) -> Option<[f64; 3]> {
    let mut fields = content.split_whitespace().map(|v| v.parse::<f64>().ok());
    Some([fields.next()??, fields.next()??, fields.next()??])
}

/// Busy share of the aggregate `cpu` line of `/proc/stat`
#[cfg(any(target_os = "linux", test))]
fn parse_cpu_busy(content: &str) -> Option<f64> {
    let line = content.lines().find(|line| line.starts_with("cpu "))?;
    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .filter_map(|v| v.parse().ok())
        .collect();

    // user nice system idle iowait ...
    let total: u64 = values.iter().sum();
    let idle = values.get(3).copied()? + values.get(4).copied().unwrap_or(0);
    if total == 0 {
        return Some(0.0);
    }
    Some((total - idle) as f64 / total as f64 * 100.0)
}

/// Filesystem types backed by a device (no `nodev` marker in `/proc/filesystems`)
#[cfg(any(target_os = "linux", test))]
fn physical_fs_types(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with("nodev"))
        .filter_map(|line| line.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

/// `(device, mount point, fs type)` triples from `/proc/mounts`
#[cfg(any(target_os = "linux", test))]
fn parse_mounts(content: &str) -> Vec<(String, String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            // Spaces in mount points are escaped as \040
            let mount_point = fields.next()?.replace("\\040", " ");
            let fs_type = fields.next()?;
            Some((device.to_string(), mount_point, fs_type.to_string()))
        })
        .collect()
}

#[cfg(target_os = "linux")]
fn linux_disk_usage() -> Result<Vec<DiskUsage>> {
    use nix::sys::statvfs::statvfs;
    use std::collections::HashSet;
    use std::path::PathBuf;

    let physical = physical_fs_types(&super::procfs::read("/proc/filesystems")?);
    let mut seen = HashSet::new();
    let mut disks = Vec::new();

    for (device, mount_point, fs_type) in parse_mounts(&super::procfs::read("/proc/mounts")?) {
        if !physical.contains(&fs_type) || !seen.insert(mount_point.clone()) {
            continue;
        }

        // Skip mounts we cannot inspect
        let Ok(stats) = statvfs(mount_point.as_str()) else {
            continue;
        };

        let fragment = stats.fragment_size() as u64;
        let total = stats.blocks() as u64 * fragment;
        let free = stats.blocks_free() as u64 * fragment;
        let available = stats.blocks_available() as u64 * fragment;

        disks.push(DiskUsage {
            device,
            mount_point: PathBuf::from(mount_point),
            total,
            used: total.saturating_sub(free),
            available,
        });
    }

    Ok(disks)
}
