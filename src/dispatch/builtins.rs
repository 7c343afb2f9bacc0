//! Session built-ins
//!
//! Commands that act on the [`SessionContext`] itself rather than on the
//! host: directory changes, history, leaving the session and the explicit
//! `ai` request form.

use super::Dispatcher;
use crate::error::{Error, Result};
use crate::intent::IntentMatcher;
use crate::models::{DispatchResult, ParsedCommand, SessionContext};
use crate::platform::{resolve_path, Platform};
use nix::unistd::{access, AccessFlags};
use std::fmt::Write;
use tracing::{debug, info};

/// Commands handled before any backend
pub const BUILTIN_COMMANDS: &[&str] = &[
    "exit", "quit", "help", "history", "clear", "cd", "pwd", "ai", "ask",
];

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const AI_USAGE: &str = "Usage: ai <natural language query>\n\
    Example: ai 'show me the files in this directory'\n\
    Type 'ai examples' for more examples.";

const AI_HINT: &str = "Type 'ai examples' for example queries.";

const HELP_TEXT: &str = "\
Available Commands:
==================

Built-in Commands:
  exit, quit              - Exit the shell
  help                    - Show this help message
  history [query]         - Show or search command history
  clear                   - Clear the screen
  cd [dir|-|~]            - Change directory
  pwd                     - Print working directory

File Operations:
  ls [-alh] [path]        - List directory contents
  mkdir [-p] <dir>        - Create directory
  rmdir <dir>             - Remove empty directory
  rm [-rf] <file/dir>     - Remove file or directory
  cp [-rp] <src> <dest>   - Copy file or directory
  mv <src> <dest>         - Move/rename file or directory
  cat <file>              - Display file contents
  touch <file>            - Create empty file
  find [path] [pattern]   - Find files/directories (-name, -iname, -type)
  stat <path>             - Show file status
  head/tail [-n N] <file> - Show the start or end of a file
  wc [-lwc] <file>        - Count lines, words and bytes

System Monitoring:
  ps [aux|-ef]            - List running processes
  top                     - Show system processes (snapshot)
  df [-h] [path]          - Show disk space usage
  free [-h]               - Show memory usage
  uptime                  - Show system uptime
  kill [-SIG] <pid>       - Send a signal to a process
  killall [-s SIG] <name> - Signal processes by name
  who, whoami, uname [-a] - Users and system identity

AI Commands:
  ai <query>              - Process natural language query
  ask <query>             - Same as 'ai'
  ai examples             - Show natural language examples

System Commands:
  Any other command is run as a host process.
  Pipelines (a | b), redirection (> >> <) and trailing & are supported.

Examples:
  ls -la
  mkdir new_folder
  cp file1.txt backup/
  ps aux
  find . *.py

Natural Language Examples:
  \"show me the files in this directory\"
  \"create a new folder called projects\"
  \"copy file.txt to backup folder\"
  \"find all python files\"
  \"what processes are running\"";

/// Lines that ask for translation explicitly and skip the heuristic gate
pub(super) fn is_explicit_request(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some("ai" | "ask"))
}

impl Dispatcher {
    pub(super) async fn run_builtin(
        &self,
        command: &ParsedCommand,
        session: &mut SessionContext,
    ) -> Result<DispatchResult> {
        let args = &command.args;
        match command.name.as_str() {
            "exit" | "quit" => {
                info!("Session {} ending", session.id());
                session.stop();
                Ok(DispatchResult::success("Goodbye!"))
            }
            "help" => Ok(DispatchResult::success(HELP_TEXT)),
            "history" => self.history(args, session),
            "clear" => Ok(DispatchResult::success(CLEAR_SCREEN)),
            "cd" => change_directory(args, session),
            "pwd" => Ok(DispatchResult::success(
                session.current_directory().display().to_string(),
            )),
            "ai" | "ask" => Ok(self.ask(args, session).await),
            other => Err(Error::CommandNotFound {
                command: other.to_string(),
            }),
        }
    }

    fn history(&self, args: &[String], session: &SessionContext) -> Result<DispatchResult> {
        let history = session.history();
        if let Some(flag) = args.iter().find(|arg| arg.starts_with('-')) {
            return Err(Error::InvalidArgument {
                command: "history".to_string(),
                message: format!("{}: not supported, history is append-only", flag),
            });
        }

        if !args.is_empty() {
            let query = args.join(" ");
            let matches = history.search(&query);
            if matches.is_empty() {
                return Ok(DispatchResult::error(format!(
                    "history: no entries matching '{}'",
                    query
                )));
            }
            return Ok(DispatchResult::success(matches.join("\n")));
        }

        if history.is_empty() {
            return Ok(DispatchResult::success("No commands in history"));
        }

        let mut text = String::new();
        for (position, entry) in history.recent(self.history_limit) {
            let _ = writeln!(text, "{:3}  {}", position, entry);
        }
        Ok(DispatchResult::success(text))
    }

    /// `ai <query>`: translate and run, showing the command first
    async fn ask(&self, args: &[String], session: &mut SessionContext) -> DispatchResult {
        if args.is_empty() {
            return DispatchResult::error(AI_USAGE);
        }

        let query = args.join(" ");
        if matches!(query.to_lowercase().as_str(), "examples" | "example" | "help") {
            return DispatchResult::success(examples_text());
        }

        match self.matcher.resolve(&query) {
            Some(resolved) => {
                debug!("ai '{}' -> '{}'", query, resolved.command);
                // Boxed: run_line reaches this function again
                Box::pin(self.run_line(&resolved.command, session))
                    .await
                    .prefixed(&format!("Executing: {}\n", resolved.command))
            }
            None => self.not_understood(&query, "query", AI_HINT),
        }
    }
}

fn examples_text() -> String {
    let mut text = String::from("Natural Language Examples:\n\n");
    for (index, example) in IntentMatcher::example_queries().iter().enumerate() {
        let _ = writeln!(text, "{:2}. {}", index + 1, example);
    }
    text.push_str("\nYou can also use these queries directly without the 'ai' command.");
    text
}

fn change_directory(args: &[String], session: &mut SessionContext) -> Result<DispatchResult> {
    let cd_error = |message: String| -> Result<DispatchResult> {
        Ok(DispatchResult::error(format!("cd: {}", message)))
    };

    if args.len() > 1 {
        return cd_error("too many arguments".to_string());
    }

    let raw = args.first().map(String::as_str).unwrap_or("~");
    let announce = raw == "-";
    let target = match raw {
        "-" => match session.previous_directory() {
            Some(previous) => previous.to_path_buf(),
            None => return cd_error("OLDPWD not set".to_string()),
        },
        "~" if args.is_empty() => match Platform::paths().home_dir() {
            Some(home) => home,
            None => return cd_error("HOME not set".to_string()),
        },
        _ => resolve_path(session.current_directory(), raw),
    };

    if !target.exists() {
        return cd_error(format!("no such file or directory: {}", raw));
    }
    if !target.is_dir() {
        return Err(Error::NotADirectory {
            command: "cd".to_string(),
            path: raw.to_string(),
        });
    }
    if access(&target, AccessFlags::X_OK).is_err() {
        return cd_error(format!("permission denied: {}", raw));
    }

    debug!("cd {}", target.display());
    session.set_current_directory(target);

    if announce {
        Ok(DispatchResult::success(
            session.current_directory().display().to_string(),
        ))
    } else {
        Ok(DispatchResult::empty())
    }
}
