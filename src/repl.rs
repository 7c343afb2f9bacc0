//! Interactive read-eval-print loop
//!
//! Reads lines from stdin, runs them through the [`Shell`] and prints the
//! results. Ctrl+C abandons the current line (while reading or while a
//! command runs) and returns to the prompt; end of input ends the session.

use crate::config::PromptConfig;
use crate::engine::Shell;
use crate::error::Result;
use crate::models::SessionContext;
use crate::platform::Platform;
use std::env;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{debug, info};

/// Renders `user@host:cwd$ ` prompts
#[derive(Debug, Clone)]
pub struct Prompt {
    show_user_host: bool,
    symbol: String,
    user: String,
    host: String,
    home: Option<PathBuf>,
}

impl Prompt {
    pub fn from_config(config: &PromptConfig) -> Self {
        let user = Platform::system()
            .current_user()
            .ok()
            .or_else(|| env::var("USER").ok())
            .unwrap_or_else(|| "user".to_string());

        let host = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());

        Self {
            show_user_host: config.show_user_host,
            symbol: config.symbol.clone(),
            user,
            host,
            home: Platform::paths().home_dir(),
        }
    }

    /// Prompt for a session sitting in `working_dir`
    pub fn render(&self, working_dir: &Path) -> String {
        let pwd = self.display_dir(working_dir);
        if self.show_user_host {
            format!("{}@{}:{}{} ", self.user, self.host, pwd, self.symbol)
        } else {
            format!("{}{} ", pwd, self.symbol)
        }
    }

    /// Directory with the home prefix shown as `~`
    fn display_dir(&self, working_dir: &Path) -> String {
        match &self.home {
            Some(home) if working_dir == home => "~".to_string(),
            Some(home) => match working_dir.strip_prefix(home) {
                Ok(rest) => format!("~/{}", rest.display()),
                Err(_) => working_dir.display().to_string(),
            },
            None => working_dir.display().to_string(),
        }
    }
}

/// Interactive session bound to stdin and stdout
pub struct Repl {
    shell: Shell,
    session: SessionContext,
    prompt: Prompt,
}

impl Repl {
    pub fn new(shell: Shell) -> Self {
        let session = shell.new_session();
        let prompt = Prompt::from_config(&shell.config().prompt);
        Self {
            shell,
            session,
            prompt,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Run until `exit` or end of input; returns the last exit code
    pub async fn run(&mut self) -> Result<i32> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        let mut last_exit_code = 0;

        while self.session.is_running() {
            let prompt = self.prompt.render(self.session.current_directory());
            stdout.write_all(prompt.as_bytes()).await?;
            stdout.flush().await?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = signal::ctrl_c() => {
                    stdout.write_all(b"^C\n").await?;
                    continue;
                }
            };

            let Some(line) = line else {
                debug!("End of input");
                stdout.write_all(b"\n").await?;
                break;
            };

            let result = tokio::select! {
                result = self.shell.execute(&line, &mut self.session) => result,
                _ = signal::ctrl_c() => {
                    stdout.write_all(b"^C\n").await?;
                    last_exit_code = 130;
                    continue;
                }
            };

            if !result.output.is_empty() {
                stdout.write_all(result.output.as_bytes()).await?;
                if !result.output.ends_with('\n') {
                    stdout.write_all(b"\n").await?;
                }
            }
            last_exit_code = result.exit_code;
        }

        info!(
            "Session {} closed after {} lines",
            self.session.id(),
            self.session.history().len()
        );
        stdout.flush().await?;
        Ok(last_exit_code)
    }
}
