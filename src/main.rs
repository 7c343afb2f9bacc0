//! plainsh - a command shell that understands plain-English requests
//!
//! Runs an interactive prompt, or a single line with `-c`.

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info};

use plainsh::{init_with_config, Repl, Shell};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "plainsh",
    version,
    about = "A command shell that understands plain-English requests",
    after_help = "CONFIGURATION:\n    plainsh looks for configuration files in the following order:\n    \
        1. Path specified with --config\n    \
        2. $PLAINSH_CONFIG\n    \
        3. $XDG_CONFIG_HOME/plainsh/config.toml (or config.json)\n    \
        4. ~/.plainsh.toml (or .json)\n    \
        5. ./.plainsh.toml (or .json)\n    \
        6. Built-in defaults\n\n\
        ENVIRONMENT:\n    \
        PLAINSH_CONFIG     Path to configuration file\n    \
        PLAINSH_DEBUG      Enable debug logging (1 or true)\n    \
        RUST_LOG           Set logging level (error, warn, info, debug, trace)"
)]
struct AppArgs {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Run a single line and exit with its exit code
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,

    /// Treat every line as a command, never as a plain-English request
    #[arg(long)]
    no_nl: bool,
}

fn debug_requested(args: &AppArgs) -> bool {
    args.debug
        || env::var("PLAINSH_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = AppArgs::parse();

    // Logs go to stderr so command output on stdout stays clean
    let log_level = if debug_requested(&args) { "debug" } else { "warn" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Starting plainsh v{}", plainsh::VERSION);
    debug!("Arguments: {:?}", args);

    let mut config = init_with_config(args.config.as_deref());
    if args.no_nl {
        config.intent.enabled = false;
    }

    let shell = Shell::new(config);

    if let Some(line) = &args.command {
        let mut session = shell.new_session();
        let result = shell.execute(line, &mut session).await;
        if !result.output.is_empty() {
            if result.output.ends_with('\n') {
                print!("{}", result.output);
            } else {
                println!("{}", result.output);
            }
        }
        std::io::stdout().flush()?;
        process::exit(result.exit_code);
    }

    let mut repl = Repl::new(shell);
    let exit_code = repl.run().await?;

    info!("plainsh shutdown complete");
    process::exit(exit_code);
}
