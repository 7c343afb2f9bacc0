//! `/proc` readers shared by the Linux implementations

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;

/// Fields of `/proc/[pid]/stat` the process table needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFields {
    pub name: String,
    pub state: String,
    pub ppid: u32,
    pub utime: u64,
    pub stime: u64,
    pub start_ticks: u64,
    pub rss_pages: u64,
}

/// Parse the content of `/proc/[pid]/stat`
///
/// The format is: pid (comm) state ppid ... and comm may itself contain
/// spaces and parentheses, so fields are counted from the last `)`.
pub fn parse_stat(content: &str) -> Option<StatFields> {
    let open_paren = content.find('(')?;
    let close_paren = content.rfind(')')?;
    let name = content.get(open_paren + 1..close_paren)?.to_string();

    // fields[0] is state (field 3 in proc(5) numbering)
    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();
    let field = |number: usize| fields.get(number - 3).copied();

    Some(StatFields {
        name,
        state: field(3)?.to_string(),
        ppid: field(4)?.parse().ok()?,
        utime: field(14)?.parse().ok()?,
        stime: field(15)?.parse().ok()?,
        start_ticks: field(22)?.parse().ok()?,
        rss_pages: field(24)?.parse().ok()?,
    })
}

/// Real uid from the `Uid:` line of `/proc/[pid]/status`
pub fn parse_status_uid(content: &str) -> Option<u32> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|uid| uid.parse().ok())
}

/// Parse `/proc/meminfo` into a map of kB values
pub fn parse_meminfo(content: &str) -> HashMap<String, u64> {
    content
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let value = rest.split_whitespace().next()?.parse().ok()?;
            Some((key.trim().to_string(), value))
        })
        .collect()
}

/// Read a whole `/proc` file
pub fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Other(format!("{}: {}", path, e)))
}

/// Boot time in seconds since the epoch, from the `btime` line of `/proc/stat`
pub fn boot_time() -> Result<i64> {
    read("/proc/stat")?
        .lines()
        .find_map(|line| line.strip_prefix("btime"))
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| Error::Other("btime not found in /proc/stat".to_string()))
}

/// Seconds since boot, from `/proc/uptime`
pub fn uptime_seconds() -> Result<f64> {
    read("/proc/uptime")?
        .split_whitespace()
        .next()
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| Error::Other("Failed to parse /proc/uptime".to_string()))
}

/// Clock ticks per second
pub fn clock_ticks() -> u64 {
    sysconf_or(nix::unistd::SysconfVar::CLK_TCK, 100)
}

/// Memory page size in bytes
pub fn page_size() -> u64 {
    sysconf_or(nix::unistd::SysconfVar::PAGE_SIZE, 4096)
}

fn sysconf_or(var: nix::unistd::SysconfVar, default: u64) -> u64 {
    match nix::unistd::sysconf(var) {
        Ok(Some(value)) if value > 0 => value as u64,
        _ => default,
    }
}
