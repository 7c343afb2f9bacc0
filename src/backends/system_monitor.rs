//! System-monitor backend
//!
//! Process, memory, disk, login and kernel queries answered from the
//! platform layer, plus signal delivery by pid (`kill`) or by name
//! (`killall`). There is no job control, so `jobs` always reports none.

use super::{format_table, human_size, CommandBackend};
use crate::error::{Error, Result};
use crate::models::parsed_command::is_option;
use crate::models::DispatchResult;
use crate::platform::{
    resolve_path, MemoryOps, Platform, ProcessInfo, ProcessOps, SignalOps, SystemOps,
};
use chrono::Local;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const SUPPORTED_COMMANDS: &[&str] = &[
    "ps", "top", "free", "df", "uptime", "kill", "killall", "jobs", "who", "whoami", "uname",
];

/// Processes shown by `top`
const TOP_PROCESS_LIMIT: usize = 20;

/// Longest command shown by `ps` before truncation
const PS_COMMAND_WIDTH: usize = 60;

const KILL_USAGE: &str =
    "usage: kill [-s sigspec | -n signum | -sigspec] pid ... or kill -l [sigspec]";

const KILLALL_USAGE: &str = "usage: killall [-s signal] process_name";

/// Host telemetry and signal commands
pub struct SystemMonitor {
    signals: Box<dyn SignalOps>,
    processes: Box<dyn ProcessOps>,
    memory: Box<dyn MemoryOps>,
    system: Box<dyn SystemOps>,
}

impl SystemMonitor {
    /// Monitor backed by the running host
    pub fn new() -> Self {
        Self::with_platform(
            Platform::signals(),
            Platform::processes(),
            Platform::memory(),
            Platform::system(),
        )
    }

    /// Monitor backed by explicit platform operations
    pub fn with_platform(
        signals: Box<dyn SignalOps>,
        processes: Box<dyn ProcessOps>,
        memory: Box<dyn MemoryOps>,
        system: Box<dyn SystemOps>,
    ) -> Self {
        Self {
            signals,
            processes,
            memory,
            system,
        }
    }

    fn ps(&self, args: &[String]) -> Result<DispatchResult> {
        let mut show_all = false;
        let mut show_user = false;
        let mut show_full = false;

        for arg in args {
            let letters = arg.strip_prefix('-').unwrap_or(arg.as_str());
            let is_flag_cluster = is_option(arg)
                || (!arg.is_empty() && arg.chars().all(|c| "auxfe".contains(c)));
            if !is_flag_cluster {
                return Err(Error::InvalidArgument {
                    command: "ps".to_string(),
                    message: format!("unsupported option '{}'", arg),
                });
            }
            show_all |= letters.contains('a') || letters.contains('x') || letters.contains('e');
            show_user |= letters.contains('u');
            show_full |= letters.contains('f');
        }

        let mut processes = self.processes.list_processes()?;
        if !show_all {
            let me = self.system.current_user()?;
            processes.retain(|p| p.user == me);
        }
        processes.sort_by_key(|p| p.pid);

        let command_of = |p: &ProcessInfo| {
            let command = if show_full {
                p.command_line()
            } else {
                p.name.clone()
            };
            truncate(&command, PS_COMMAND_WIDTH)
        };
        let started = |p: &ProcessInfo| {
            p.start_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "?".to_string())
        };

        let table = if show_user {
            let rows: Vec<Vec<String>> = processes
                .iter()
                .map(|p| {
                    vec![
                        p.user.clone(),
                        p.pid.to_string(),
                        p.ppid.to_string(),
                        format!("{:.1}", p.cpu_percent),
                        format!("{:.1}", p.memory_percent),
                        p.state.clone(),
                        started(p),
                        command_of(p),
                    ]
                })
                .collect();
            format_table(
                &["USER", "PID", "PPID", "%CPU", "%MEM", "STAT", "TIME", "COMMAND"],
                &rows,
            )
        } else {
            let rows: Vec<Vec<String>> = processes
                .iter()
                .map(|p| {
                    vec![
                        p.pid.to_string(),
                        p.ppid.to_string(),
                        p.state.clone(),
                        started(p),
                        command_of(p),
                    ]
                })
                .collect();
            format_table(&["PID", "PPID", "STAT", "TIME", "COMMAND"], &rows)
        };

        Ok(DispatchResult::success(table))
    }

    /// One-shot snapshot: load, CPU and memory header, then the busiest processes
    fn top(&self) -> Result<DispatchResult> {
        let memory = self.memory.memory_info()?;
        let mut lines = Vec::new();

        if let Ok([one, five, fifteen]) = self.system.load_average() {
            lines.push(format!(
                "System Load: {:.2}, {:.2}, {:.2}",
                one, five, fifteen
            ));
        }
        if let Ok(cpu) = self.system.cpu_usage() {
            lines.push(format!("CPU Usage: {:.1}%", cpu));
        }
        lines.push(format!(
            "Memory Usage: {:.1}% ({}/{})",
            memory.used_percent(),
            human_size(memory.used),
            human_size(memory.total)
        ));
        lines.push(String::new());

        let mut processes = self.processes.list_processes()?;
        processes.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.pid.cmp(&b.pid))
        });
        processes.truncate(TOP_PROCESS_LIMIT);

        let rows: Vec<Vec<String>> = processes
            .iter()
            .map(|p| {
                vec![
                    p.pid.to_string(),
                    p.user.chars().take(10).collect(),
                    format!("{:.1}", p.cpu_percent),
                    format!("{:.1}", p.memory_percent),
                    p.state.clone(),
                    p.name.chars().take(20).collect(),
                ]
            })
            .collect();
        lines.push(format_table(
            &["PID", "USER", "CPU%", "MEM%", "STAT", "COMMAND"],
            &rows,
        ));

        Ok(DispatchResult::success(lines.join("\n")))
    }

    fn free(&self, args: &[String]) -> Result<DispatchResult> {
        let human = args.iter().any(|a| is_option(a) && a.contains('h'));
        let memory = self.memory.memory_info()?;
        let show = |bytes: u64| {
            if human {
                human_size(bytes)
            } else {
                (bytes / 1024).to_string()
            }
        };

        let rows = vec![
            vec![
                "Mem:".to_string(),
                show(memory.total),
                show(memory.used),
                show(memory.available),
            ],
            vec![
                "Swap:".to_string(),
                show(memory.swap_total),
                show(memory.swap_used),
                show(memory.swap_free),
            ],
        ];
        Ok(DispatchResult::success(format_table(
            &["", "total", "used", "free"],
            &rows,
        )))
    }

    /// `df [-h] [PATH]`; with a path, only the filesystem holding it
    fn df(&self, args: &[String], cwd: &Path) -> Result<DispatchResult> {
        let human = args.iter().any(|a| is_option(a) && a.contains('h'));
        let target = args.iter().find(|a| !is_option(a));

        let mut disks = self.system.disk_usage()?;
        if let Some(raw) = target {
            let path = resolve_path(cwd, raw);
            if !path.exists() {
                return Err(Error::PathNotFound {
                    command: "df".to_string(),
                    path: raw.clone(),
                });
            }
            let holder = disks
                .iter()
                .filter(|d| path.starts_with(&d.mount_point))
                .max_by_key(|d| d.mount_point.components().count())
                .cloned();
            disks = holder.into_iter().collect();
        }

        let show = |bytes: u64| {
            if human {
                human_size(bytes)
            } else {
                (bytes / 1024).to_string()
            }
        };
        let rows: Vec<Vec<String>> = disks
            .iter()
            .map(|d| {
                let percent = if d.total == 0 {
                    "-".to_string()
                } else {
                    format!("{:.1}%", d.used as f64 / d.total as f64 * 100.0)
                };
                vec![
                    d.device.clone(),
                    show(d.total),
                    show(d.used),
                    show(d.available),
                    percent,
                    d.mount_point.display().to_string(),
                ]
            })
            .collect();

        Ok(DispatchResult::success(format_table(
            &["Filesystem", "Size", "Used", "Available", "Use%", "Mounted on"],
            &rows,
        )))
    }

    fn uptime(&self) -> Result<DispatchResult> {
        let seconds = self.system.uptime()?.as_secs();
        let days = seconds / 86_400;
        let hours = (seconds % 86_400) / 3_600;
        let minutes = (seconds % 3_600) / 60;

        let up = if days > 0 {
            format!(
                "{} day{}, {:02}:{:02}",
                days,
                if days == 1 { "" } else { "s" },
                hours,
                minutes
            )
        } else {
            format!("{:02}:{:02}", hours, minutes)
        };

        let users = self
            .system
            .logged_in_users()
            .map(|sessions| sessions.len())
            .unwrap_or(0);
        let load = self
            .system
            .load_average()
            .map(|[a, b, c]| format!(", load average: {:.2}, {:.2}, {:.2}", a, b, c))
            .unwrap_or_default();

        Ok(DispatchResult::success(format!(
            " {} up {}, {} user{}{}",
            Local::now().format("%H:%M:%S"),
            up,
            users,
            if users == 1 { "" } else { "s" },
            load
        )))
    }

    fn kill(&self, args: &[String]) -> Result<DispatchResult> {
        if args.is_empty() {
            return Err(Error::failed("kill", KILL_USAGE));
        }

        let mut signal = Signal::SIGTERM;
        let mut pids = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-l" => return Ok(DispatchResult::success(signal_names())),
                "-s" | "-n" => {
                    let spec = iter
                        .next()
                        .ok_or_else(|| Error::failed("kill", KILL_USAGE))?;
                    signal = parse_signal("kill", spec)?;
                }
                other if is_option(other) => {
                    signal = parse_signal("kill", &other[1..])?;
                }
                other => {
                    let pid = other.parse::<i32>().map_err(|_| Error::InvalidArgument {
                        command: "kill".to_string(),
                        message: format!("'{}': arguments must be process or job IDs", other),
                    })?;
                    pids.push(pid);
                }
            }
        }

        if pids.is_empty() {
            return Err(Error::failed("kill", KILL_USAGE));
        }

        let mut errors = Vec::new();
        for pid in pids {
            debug!("sending {} to {}", signal, pid);
            if let Err(e) = self.signals.send_signal(pid, signal as i32) {
                errors.push(format!("kill: ({}) - {}", pid, signal_failure(&e)));
            }
        }

        if errors.is_empty() {
            Ok(DispatchResult::empty())
        } else {
            Ok(DispatchResult::error(errors.join("\n")))
        }
    }

    fn killall(&self, args: &[String]) -> Result<DispatchResult> {
        let mut signal = Signal::SIGTERM;
        let mut names = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-s" => {
                    let spec = iter
                        .next()
                        .ok_or_else(|| Error::failed("killall", KILLALL_USAGE))?;
                    signal = parse_signal("killall", spec)?;
                }
                other if is_option(other) => {
                    signal = parse_signal("killall", &other[1..])?;
                }
                other => names.push(other.to_string()),
            }
        }

        if names.is_empty() {
            return Err(Error::failed("killall", KILLALL_USAGE));
        }

        let own_pid = std::process::id();
        let processes = self.processes.list_processes()?;

        let mut killed = 0;
        let mut errors = Vec::new();
        for name in &names {
            let targets: Vec<&ProcessInfo> = processes
                .iter()
                .filter(|p| &p.name == name && p.pid != own_pid)
                .collect();
            if targets.is_empty() {
                errors.push(format!("{}: no process found", name));
                continue;
            }
            for process in targets {
                match self.signals.send_signal(process.pid as i32, signal as i32) {
                    Ok(()) => killed += 1,
                    Err(e) => errors.push(format!(
                        "{}({}): {}",
                        name,
                        process.pid,
                        signal_failure(&e)
                    )),
                }
            }
        }

        let mut lines = Vec::new();
        if killed > 0 {
            lines.push(format!("Killed {} process(es)", killed));
        }
        lines.extend(errors.iter().cloned());
        let output = lines.join("\n");

        if errors.is_empty() {
            Ok(DispatchResult::success(output))
        } else {
            Ok(DispatchResult::error(output))
        }
    }

    fn who(&self) -> Result<DispatchResult> {
        let sessions = self.system.logged_in_users()?;
        if sessions.is_empty() {
            return Ok(DispatchResult::success("No users currently logged in"));
        }

        let rows: Vec<Vec<String>> = sessions
            .iter()
            .map(|s| {
                vec![
                    s.user.clone(),
                    if s.terminal.is_empty() {
                        "console".to_string()
                    } else {
                        s.terminal.clone()
                    },
                    s.started
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "?".to_string()),
                ]
            })
            .collect();
        Ok(DispatchResult::success(format_table(
            &["USER", "TTY", "LOGIN"],
            &rows,
        )))
    }

    fn uname(&self, args: &[String]) -> Result<DispatchResult> {
        let mut wanted = [false; 5];
        for arg in args {
            let letters = arg.strip_prefix('-').filter(|l| !l.is_empty()).ok_or_else(|| {
                Error::InvalidArgument {
                    command: "uname".to_string(),
                    message: format!("extra operand '{}'", arg),
                }
            })?;
            for letter in letters.chars() {
                match letter {
                    'a' => wanted = [true; 5],
                    's' => wanted[0] = true,
                    'n' => wanted[1] = true,
                    'r' => wanted[2] = true,
                    'v' => wanted[3] = true,
                    'm' => wanted[4] = true,
                    other => {
                        return Err(Error::InvalidArgument {
                            command: "uname".to_string(),
                            message: format!("invalid option -- '{}'", other),
                        })
                    }
                }
            }
        }
        if !wanted.contains(&true) {
            wanted[0] = true;
        }

        let kernel = self.system.kernel_info()?;
        let fields = [
            kernel.sysname,
            kernel.nodename,
            kernel.release,
            kernel.version,
            kernel.machine,
        ];
        let parts: Vec<String> = fields
            .into_iter()
            .zip(wanted)
            .filter_map(|(field, show)| show.then_some(field))
            .collect();

        Ok(DispatchResult::success(parts.join(" ")))
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBackend for SystemMonitor {
    fn name(&self) -> &'static str {
        "system_monitor"
    }

    fn supported_commands(&self) -> &'static [&'static str] {
        SUPPORTED_COMMANDS
    }

    fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<DispatchResult> {
        debug!("system monitor {} {:?}", command, args);
        match command {
            "ps" => self.ps(args),
            "top" => self.top(),
            "free" => self.free(args),
            "df" => self.df(args, cwd),
            "uptime" => self.uptime(),
            "kill" => self.kill(args),
            "killall" => self.killall(args),
            "jobs" => Ok(DispatchResult::success("No active jobs")),
            "who" => self.who(),
            "whoami" => Ok(DispatchResult::success(self.system.current_user()?)),
            "uname" => self.uname(args),
            other => Err(Error::InvalidArgument {
                command: other.to_string(),
                message: "not a system monitor command".to_string(),
            }),
        }
    }
}

/// Parse `9`, `KILL` or `SIGKILL` (any case) into a signal
fn parse_signal(command: &str, spec: &str) -> Result<Signal> {
    let invalid = || Error::InvalidArgument {
        command: command.to_string(),
        message: format!("{}: invalid signal specification", spec),
    };

    if let Ok(number) = spec.parse::<i32>() {
        return Signal::try_from(number).map_err(|_| invalid());
    }

    let upper = spec.to_ascii_uppercase();
    let name = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{}", upper)
    };
    Signal::from_str(&name).map_err(|_| invalid())
}

/// `HUP INT QUIT ...` as printed by `kill -l`
fn signal_names() -> String {
    Signal::iterator()
        .map(|s| s.as_str().trim_start_matches("SIG").to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn signal_failure(err: &Error) -> String {
    match err {
        Error::Nix(errno) => match *errno {
            Errno::ESRCH => "No such process".to_string(),
            Errno::EPERM => "Operation not permitted".to_string(),
            other => other.desc().to_string(),
        },
        other => other.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
