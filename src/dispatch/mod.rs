//! Line dispatch
//!
//! Decides which backend runs a line. Precedence is fixed:
//!
//! 1. natural-language requests are translated by the [`IntentMatcher`]
//!    and the resulting command runs as typed (it is never translated again)
//! 2. session built-ins
//! 3. file operations
//! 4. system-monitor commands
//! 5. external processes, under the configured timeout
//!
//! Every backend error becomes a one-line message with a non-zero exit
//! code here; nothing escapes as a panic or an `Err`.

mod builtins;

pub use builtins::BUILTIN_COMMANDS;

use crate::backends::{CommandBackend, CommandCategory, FileOperations, SystemMonitor};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::execution::{ExternalCommand, ExternalExecutor, ProcessExecutor};
use crate::intent::IntentMatcher;
use crate::models::parsed_command::is_option;
use crate::models::{DispatchResult, ParsedCommand, SessionContext};
use crate::parser::{self, detect_background, split_pipeline};
use crate::platform::resolve_path;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};

/// Hint shown when a request is not understood and no suggestion applies
const NOT_UNDERSTOOD_HINT: &str =
    "Type 'help' for available commands or 'ai examples' for natural language examples.";

/// Commands that read the `<` file as an operand when given none
const READS_INPUT_OPERAND: &[&str] = &["cat", "head", "tail", "wc"];

/// Routes lines to backends
pub struct Dispatcher {
    matcher: IntentMatcher,
    intent_enabled: bool,
    file_ops: FileOperations,
    monitor: SystemMonitor,
    executor: Box<dyn ExternalExecutor>,
    command_timeout: Duration,
    history_limit: usize,
}

impl Dispatcher {
    /// Dispatcher over the host platform and process executor
    pub fn new(config: &Config) -> Self {
        Self::with_backends(config, SystemMonitor::new(), Box::new(ProcessExecutor::new()))
    }

    /// Dispatcher with explicit monitor and executor backends
    pub fn with_backends(
        config: &Config,
        monitor: SystemMonitor,
        executor: Box<dyn ExternalExecutor>,
    ) -> Self {
        Self {
            matcher: IntentMatcher::new().with_max_suggestions(config.intent.max_suggestions),
            intent_enabled: config.intent.enabled,
            file_ops: FileOperations::new(),
            monitor,
            executor,
            command_timeout: config.shell.command_timeout(),
            history_limit: config.shell.history_display_limit,
        }
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    /// Backend that owns `command`
    pub fn category_of(&self, command: &str) -> CommandCategory {
        if BUILTIN_COMMANDS.contains(&command) {
            CommandCategory::Builtin
        } else if self.file_ops.supports(command) {
            CommandCategory::FileOperation
        } else if self.monitor.supports(command) {
            CommandCategory::SystemMonitor
        } else {
            CommandCategory::External
        }
    }

    /// Lines that are clearly typed commands even when they contain trigger
    /// words: `ai`/`ask` requests, program paths such as `./run.sh`, lines
    /// using (or starting with) redirection or pipes, and a known command whose first argument
    /// is a flag, path or wildcard (`find . *.py`, `cd a/b`, `rm -r old`).
    pub fn is_direct_invocation(&self, line: &str) -> bool {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return false;
        };
        let args: Vec<&str> = words.collect();

        if builtins::is_explicit_request(first) || first.contains('/') {
            return true;
        }
        if first.starts_with(['>', '<', '|', '&'])
            || args.iter().any(|arg| arg.starts_with(['>', '<', '|']))
        {
            return true;
        }
        if self.category_of(first) == CommandCategory::External {
            return false;
        }

        args.first().is_some_and(|arg| {
            arg.starts_with(['-', '.', '~'])
                || arg.contains('/')
                || parser::wildcard::is_pattern(arg)
        })
    }

    /// Run one input line against `session`
    ///
    /// Every non-blank line is appended to the session history before
    /// anything else happens, whatever the outcome.
    pub async fn dispatch(&self, line: &str, session: &mut SessionContext) -> DispatchResult {
        if line.trim().is_empty() {
            return DispatchResult::empty();
        }
        session.record(line);

        let span = info_span!("dispatch", session = %session.id());
        self.interpret(line.trim(), session).instrument(span).await
    }

    /// Natural-language step, then command dispatch
    async fn interpret(&self, line: &str, session: &mut SessionContext) -> DispatchResult {
        if self.intent_enabled
            && !self.is_direct_invocation(line)
            && self.matcher.is_likely_natural_language(line)
        {
            return match self.matcher.resolve(line) {
                Some(resolved) => {
                    debug!(
                        "'{}' understood as '{}' ({})",
                        line, resolved.command, resolved.category
                    );
                    self.run_line(&resolved.command, session).await
                }
                None => self.not_understood(line, "command", NOT_UNDERSTOOD_HINT),
            };
        }

        self.run_line(line, session).await
    }

    /// Suggestions (or `hint`) for a request nothing matched
    fn not_understood(&self, query: &str, noun: &str, hint: &str) -> DispatchResult {
        let suggestions = self.matcher.suggest(query);
        if suggestions.is_empty() {
            return DispatchResult::error(format!(
                "I couldn't understand that {}. {}",
                noun, hint
            ));
        }

        let mut message = format!("I couldn't understand that {}. Did you mean:", noun);
        for suggestion in suggestions {
            message.push_str("\n  • ");
            message.push_str(&suggestion);
        }
        DispatchResult::error(message)
    }

    /// Dispatch a command line without natural-language translation
    pub async fn run_line(&self, line: &str, session: &mut SessionContext) -> DispatchResult {
        if parser::is_pipeline(line) {
            return self.run_pipeline(line, session).await;
        }

        let Some(command) = parser::parse_command(line) else {
            return DispatchResult::from_error(&Error::EmptyCommand);
        };

        let category = self.category_of(&command.name);
        debug!("'{}' routed to {}", command.name, category);

        let result = self
            .run_command(&command, category, session)
            .await
            .unwrap_or_else(|e| DispatchResult::from_error(&e));

        let detached = command.background && category == CommandCategory::External;
        match &command.output_file {
            Some(target) if !detached => {
                write_redirect(result, target, command.append_mode, session.current_directory())
            }
            _ => result,
        }
    }

    async fn run_command(
        &self,
        command: &ParsedCommand,
        category: CommandCategory,
        session: &mut SessionContext,
    ) -> Result<DispatchResult> {
        let cwd = session.current_directory().to_path_buf();
        let input = match &command.input_file {
            Some(raw) => {
                let path = resolve_path(&cwd, raw);
                if !path.is_file() {
                    return Err(Error::PathNotFound {
                        command: command.name.clone(),
                        path: raw.clone(),
                    });
                }
                Some((raw.clone(), path))
            }
            None => None,
        };

        match category {
            CommandCategory::Builtin => self.run_builtin(command, session).await,
            CommandCategory::FileOperation => {
                let mut args = command.args.clone();
                if let Some((raw, _)) = &input {
                    if READS_INPUT_OPERAND.contains(&command.name.as_str())
                        && !has_file_operand(command)
                    {
                        args.push(raw.clone());
                    }
                }
                self.file_ops.execute(&command.name, &args, &cwd)
            }
            CommandCategory::SystemMonitor => self.monitor.execute(&command.name, &command.args, &cwd),
            CommandCategory::External => {
                let mut external = ExternalCommand::new(
                    command.name.clone(),
                    command.args.clone(),
                    cwd.clone(),
                    self.command_timeout,
                )
                .with_stdin(input.map(|(_, path)| path))
                .in_background(command.background);
                if command.background {
                    external.output_file = command
                        .output_file
                        .as_ref()
                        .map(|raw| (resolve_path(&cwd, raw), command.append_mode));
                }
                self.executor.execute(&external).await
            }
        }
    }

    /// Multi-stage pipelines run whole in the host shell
    async fn run_pipeline(&self, line: &str, session: &SessionContext) -> DispatchResult {
        let stages = split_pipeline(line);
        debug!("pipeline with {} stages", stages.len());

        let (line, background) = detect_background(&stages.join(" | "));
        let external =
            ExternalCommand::pipeline(&line, session.current_directory(), self.command_timeout)
                .in_background(background);
        self.executor
            .execute(&external)
            .await
            .unwrap_or_else(|e| DispatchResult::from_error(&e))
    }
}

/// Whether a read command already names a file
fn has_file_operand(command: &ParsedCommand) -> bool {
    let mut args = command.args.iter();
    while let Some(arg) = args.next() {
        if arg == "-n" {
            args.next();
        } else if !is_option(arg) {
            return true;
        }
    }
    false
}

/// Send a result's output to `target` instead of the caller
fn write_redirect(
    result: DispatchResult,
    target: &str,
    append: bool,
    cwd: &Path,
) -> DispatchResult {
    let path = resolve_path(cwd, target);
    let mut body = result.output;
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }

    let written = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(&path)
        .and_then(|mut file| file.write_all(body.as_bytes()));

    match written {
        Ok(()) => DispatchResult::with_code(String::new(), result.exit_code),
        Err(e) => DispatchResult::from_error(&Error::from_io("plainsh", target, e)),
    }
}
