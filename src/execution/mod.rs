//! External command execution
//!
//! Commands no in-process backend claims are spawned directly as host
//! processes under a wall-clock timeout. Each foreground child leads its own
//! process group, and the whole group is killed when the timeout expires or
//! the waiting future is dropped. Multi-stage pipelines are handed whole to
//! `sh -c`.

use crate::error::{Error, Result};
use crate::models::DispatchResult;
use async_trait::async_trait;
use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Shell used for multi-stage pipelines
pub const PIPELINE_SHELL: &str = "sh";

/// One external process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// File connected to the child's stdin
    pub stdin_file: Option<PathBuf>,
    /// Detach and report the pid instead of waiting
    pub background: bool,
    /// Where a detached child's stdout goes, and whether to append
    pub output_file: Option<(PathBuf, bool)>,
    pub timeout: Duration,
}

impl ExternalCommand {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
            stdin_file: None,
            background: false,
            output_file: None,
            timeout,
        }
    }

    /// Run a whole pipeline line through the host shell
    pub fn pipeline(line: &str, working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::new(
            PIPELINE_SHELL,
            vec!["-c".to_string(), line.to_string()],
            working_dir,
            timeout,
        )
    }

    pub fn with_stdin(mut self, file: Option<PathBuf>) -> Self {
        self.stdin_file = file;
        self
    }

    pub fn in_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

/// Runs commands outside the shell process
#[async_trait]
pub trait ExternalExecutor: Send + Sync {
    async fn execute(&self, command: &ExternalCommand) -> Result<DispatchResult>;
}

/// Executor that spawns host processes with tokio
#[derive(Debug, Default)]
pub struct ProcessExecutor {
    /// Extra environment variables for every child
    env_vars: HashMap<String, String>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set environment variable
    pub fn set_env(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    fn build(&self, command: &ExternalCommand) -> Result<Command> {
        let mut cmd = Command::new(program_path(&command.program, &command.working_dir));
        cmd.args(&command.args)
            .current_dir(&command.working_dir)
            .envs(&self.env_vars);

        let stdin = match &command.stdin_file {
            Some(path) => {
                let file = File::open(path).map_err(|e| {
                    Error::from_io(&command.program, &path.display().to_string(), e)
                })?;
                Stdio::from(file)
            }
            None => Stdio::null(),
        };
        cmd.stdin(stdin);
        Ok(cmd)
    }

    fn spawn_error(command: &ExternalCommand, err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::NotFound => Error::CommandNotFound {
                command: command.program.clone(),
            },
            _ => Error::CommandSpawnFailed {
                command: command.program.clone(),
                reason: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl ExternalExecutor for ProcessExecutor {
    async fn execute(&self, command: &ExternalCommand) -> Result<DispatchResult> {
        debug!(
            "spawning {} {:?} in {}",
            command.program,
            command.args,
            command.working_dir.display()
        );
        let mut cmd = self.build(command)?;

        if command.background {
            let stdout = match &command.output_file {
                Some((path, append)) => std::fs::OpenOptions::new()
                    .create(true)
                    .write(true)
                    .append(*append)
                    .truncate(!*append)
                    .open(path)
                    .map(Stdio::from)
                    .map_err(|e| {
                        Error::from_io(&command.program, &path.display().to_string(), e)
                    })?,
                None => Stdio::null(),
            };
            let child = cmd
                .stdout(stdout)
                .stderr(Stdio::null())
                .kill_on_drop(false)
                .spawn()
                .map_err(|e| Self::spawn_error(command, e))?;
            let pid = child.id().unwrap_or_default();
            return Ok(DispatchResult::success(format!("[bg] {}", pid)));
        }

        let child = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Self::spawn_error(command, e))?;
        let group = GroupGuard::new(child.id());

        // On expiry, or when the caller stops waiting, the guard is dropped
        // with the group still armed and takes every descendant down with it
        let output = match timeout(command.timeout, child.wait_with_output()).await {
            Ok(result) => {
                let output = result?;
                group.release();
                output
            }
            Err(_) => {
                warn!(
                    "{} exceeded {}s and was killed",
                    command.program,
                    command.timeout.as_secs()
                );
                return Err(Error::CommandTimeout {
                    command: command.program.clone(),
                    duration: command.timeout,
                });
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            text.push('\n');
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        let exit_code = output
            .status
            .code()
            .or_else(|| output.status.signal().map(|signal| 128 + signal))
            .unwrap_or(-1);

        Ok(DispatchResult::with_code(text, exit_code))
    }
}

/// Kills a foreground child's process group unless released
///
/// The child is spawned with `process_group(0)`, so its pid is also the
/// group id shared by pipeline stages and anything else it starts.
struct GroupGuard {
    pgid: Option<Pid>,
}

impl GroupGuard {
    fn new(pid: Option<u32>) -> Self {
        Self {
            pgid: pid.and_then(|pid| i32::try_from(pid).ok()).map(Pid::from_raw),
        }
    }

    /// The child finished on its own; leave the group alone
    fn release(mut self) {
        self.pgid = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        match killpg(pgid, Signal::SIGKILL) {
            Ok(()) => debug!("killed process group {}", pgid),
            // Every member already exited
            Err(Errno::ESRCH) => {}
            Err(e) => warn!("Failed to kill process group {}: {}", pgid, e),
        }
    }
}

/// Relative program paths like `./run.sh` resolve against the session directory
fn program_path(program: &str, working_dir: &Path) -> PathBuf {
    let path = Path::new(program);
    if program.contains('/') && path.is_relative() {
        working_dir.join(path)
    } else {
        path.to_path_buf()
    }
}
