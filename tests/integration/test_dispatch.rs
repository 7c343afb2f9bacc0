//! Integration Tests for Line Dispatch
//!
//! These tests drive whole lines through the shell engine and check which
//! backend answered and what it returned.

use plainsh::backends::CommandCategory;
use plainsh::{Config, SessionContext, Shell};
use std::fs;
use tempfile::TempDir;

fn shell_with(config: Config) -> (Shell, SessionContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = SessionContext::new(dir.path());
    (Shell::new(config), session, dir)
}

fn shell() -> (Shell, SessionContext, TempDir) {
    shell_with(Config::default())
}

#[tokio::test]
async fn test_natural_language_request_runs_translated_command() {
    let (shell, mut session, dir) = shell();

    let result = shell
        .execute("create a new folder called projects", &mut session)
        .await;

    assert!(result.is_success(), "{}", result.output);
    assert!(dir.path().join("projects").is_dir());
    // History keeps what was typed, not what ran
    assert_eq!(
        session.history().last(),
        Some("create a new folder called projects")
    );
}

#[tokio::test]
async fn test_unknown_request_lists_suggestions() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("how do i search stuff", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(
        result.output,
        "I couldn't understand that command. Did you mean:\n  • find . -name \"<pattern>\"\n  • find <path> -name \"<pattern>\""
    );
}

#[tokio::test]
async fn test_unknown_request_without_suggestions() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("could you juggle", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(
        result.output,
        "I couldn't understand that command. Type 'help' for available commands or 'ai examples' for natural language examples."
    );
}

#[tokio::test]
async fn test_direct_find_is_not_translated() {
    let (shell, mut session, dir) = shell();
    fs::write(dir.path().join("main.py"), "").unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();

    let result = shell.execute("find . *.py", &mut session).await;

    assert_eq!(result.output, "./main.py");
}

#[tokio::test]
async fn test_backend_precedence() {
    let (shell, _session, _dir) = shell();
    let dispatcher = shell.dispatcher();

    assert_eq!(dispatcher.category_of("pwd"), CommandCategory::Builtin);
    assert_eq!(dispatcher.category_of("mkdir"), CommandCategory::FileOperation);
    assert_eq!(dispatcher.category_of("free"), CommandCategory::SystemMonitor);
    assert_eq!(dispatcher.category_of("echo"), CommandCategory::External);
}

#[tokio::test]
async fn test_external_command_output() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("echo hello", &mut session).await;

    assert!(result.is_success());
    assert_eq!(result.output, "hello\n");
}

#[tokio::test]
async fn test_external_command_runs_in_session_directory() {
    let (shell, mut session, dir) = shell();
    fs::create_dir(dir.path().join("inner")).unwrap();

    shell.execute("cd inner", &mut session).await;
    let result = shell.execute("sh -c pwd", &mut session).await;

    assert!(result.output.trim_end().ends_with("inner"));
}

#[tokio::test]
async fn test_missing_program_is_127() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("nonexistent_cmd_xyz", &mut session).await;

    assert_eq!(result.exit_code, 127);
    assert_eq!(result.output, "Command 'nonexistent_cmd_xyz' not found");
}

#[tokio::test]
async fn test_slow_program_times_out() {
    let mut config = Config::default();
    config.shell.command_timeout_secs = 1;
    let (shell, mut session, _dir) = shell_with(config);

    let result = shell.execute("sleep 5", &mut session).await;

    assert_eq!(result.exit_code, 124);
    assert_eq!(result.output, "Command timed out after 1 seconds");
}

#[tokio::test]
async fn test_timed_out_pipeline_leaves_nothing_running() {
    let mut config = Config::default();
    config.shell.command_timeout_secs = 1;
    let (shell, mut session, dir) = shell_with(config);

    let result = shell
        .execute("(sleep 2; touch late.txt) | cat", &mut session)
        .await;
    assert_eq!(result.exit_code, 124);

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    assert!(!dir.path().join("late.txt").exists());
}

#[tokio::test]
async fn test_pipeline_runs_as_a_whole() {
    let (shell, mut session, _dir) = shell();

    let result = shell
        .execute("printf 'x\\ny\\nz\\n' | wc -l", &mut session)
        .await;

    assert!(result.is_success());
    assert_eq!(result.output.trim(), "3");
}

#[tokio::test]
async fn test_output_redirection_of_external_command() {
    let (shell, mut session, dir) = shell();

    let result = shell.execute("echo hello > out.txt", &mut session).await;
    assert!(result.is_success());
    assert!(result.output.is_empty());

    shell.execute("echo again >> out.txt", &mut session).await;
    let written = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(written, "hello\nagain\n");
}

#[tokio::test]
async fn test_input_redirection_of_external_command() {
    let (shell, mut session, dir) = shell();
    fs::write(dir.path().join("names.txt"), "carol\nbob\n").unwrap();

    let result = shell.execute("sort < names.txt", &mut session).await;

    assert_eq!(result.output, "bob\ncarol\n");
}

#[tokio::test]
async fn test_background_command_returns_immediately() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("sleep 1 &", &mut session).await;

    assert!(result.is_success());
    assert!(result.output.starts_with("[bg] "));
}

#[tokio::test]
async fn test_intent_layer_can_be_disabled() {
    let mut config = Config::default();
    config.intent.enabled = false;
    let (shell, mut session, _dir) = shell_with(config);

    // Without translation this is just an unknown program
    let result = shell.execute("where am i", &mut session).await;

    assert_ne!(result.exit_code, 0);
    assert_ne!(result.output, session.current_directory().display().to_string());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_system_monitor_commands() {
    let (shell, mut session, _dir) = shell();

    let result = shell.execute("uname -s", &mut session).await;
    assert_eq!(result.output, "Linux");

    let result = shell.execute("whoami", &mut session).await;
    assert!(result.is_success());
    assert!(!result.output.is_empty());
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let shell = Shell::default();
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let mut first = SessionContext::new(first_dir.path());
    let mut second = SessionContext::new(second_dir.path());
    fs::create_dir(first_dir.path().join("sub")).unwrap();

    shell.execute("cd sub", &mut first).await;
    shell.execute("pwd", &mut second).await;

    assert_eq!(first.current_directory(), first_dir.path().join("sub"));
    assert_eq!(second.current_directory(), second_dir.path());
    assert_eq!(first.history().entries(), ["cd sub"]);
    assert_eq!(second.history().entries(), ["pwd"]);
}
