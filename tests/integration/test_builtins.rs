//! Integration Tests for Session Built-ins
//!
//! cd, pwd, history, help, clear, exit and the explicit `ai` form.

use plainsh::{Config, SessionContext, Shell};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup() -> (Shell, SessionContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = SessionContext::new(dir.path());
    (Shell::new(Config::default()), session, dir)
}

#[tokio::test]
async fn test_pwd_reports_session_directory() {
    let (shell, mut session, dir) = setup();

    let result = shell.execute("pwd", &mut session).await;

    assert!(result.is_success());
    assert_eq!(result.output, dir.path().display().to_string());
}

#[tokio::test]
async fn test_cd_relative_absolute_and_parent() {
    let (shell, mut session, dir) = setup();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();

    let result = shell.execute("cd a/b", &mut session).await;
    assert!(result.is_success());
    assert!(result.output.is_empty());
    assert_eq!(session.current_directory(), dir.path().join("a/b"));

    shell.execute("cd ..", &mut session).await;
    assert_eq!(session.current_directory(), dir.path().join("a"));

    shell.execute("cd /", &mut session).await;
    assert_eq!(session.current_directory(), Path::new("/"));
}

#[tokio::test]
async fn test_cd_dash_returns_to_previous() {
    let (shell, mut session, dir) = setup();
    fs::create_dir(dir.path().join("work")).unwrap();

    shell.execute("cd work", &mut session).await;
    let result = shell.execute("cd -", &mut session).await;

    assert_eq!(result.output, dir.path().display().to_string());
    assert_eq!(session.current_directory(), dir.path());
}

#[tokio::test]
async fn test_cd_home() {
    let (shell, mut session, _dir) = setup();
    let Some(home) = dirs::home_dir() else {
        return;
    };
    if !home.is_dir() {
        return;
    }

    shell.execute("cd", &mut session).await;
    assert_eq!(session.current_directory(), home);
}

#[tokio::test]
async fn test_cd_failure_keeps_directory() {
    let (shell, mut session, dir) = setup();
    fs::write(dir.path().join("plain.txt"), "").unwrap();

    let result = shell.execute("cd nowhere", &mut session).await;
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "cd: no such file or directory: nowhere");

    let result = shell.execute("cd plain.txt", &mut session).await;
    assert_eq!(result.output, "cd: not a directory: plain.txt");
    assert_eq!(result.exit_code, 1);

    assert_eq!(session.current_directory(), dir.path());
}

#[tokio::test]
async fn test_history_lists_numbered_entries() {
    let (shell, mut session, _dir) = setup();

    shell.execute("pwd", &mut session).await;
    shell.execute("nonexistent_cmd_xyz", &mut session).await;
    let result = shell.execute("history", &mut session).await;

    assert_eq!(
        result.output,
        "  1  pwd\n  2  nonexistent_cmd_xyz\n  3  history\n"
    );
}

#[tokio::test]
async fn test_history_search() {
    let (shell, mut session, _dir) = setup();

    shell.execute("echo alpha", &mut session).await;
    shell.execute("pwd", &mut session).await;
    let result = shell.execute("history alpha", &mut session).await;

    assert!(result.output.lines().any(|line| line == "echo alpha"));
    assert!(!result.output.lines().any(|line| line == "pwd"));
}

#[tokio::test]
async fn test_history_cannot_be_cleared() {
    let (shell, mut session, _dir) = setup();

    shell.execute("pwd", &mut session).await;
    let result = shell.execute("history -c", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_help_and_clear() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("help", &mut session).await;
    assert!(result.output.starts_with("Available Commands:"));
    assert!(result.output.contains("ai <query>"));

    let result = shell.execute("clear", &mut session).await;
    assert_eq!(result.output, "\x1b[2J\x1b[H");
}

#[tokio::test]
async fn test_exit_and_quit_stop_the_session() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("exit", &mut session).await;
    assert_eq!(result.output, "Goodbye!");
    assert!(result.is_success());
    assert!(!session.is_running());

    let (shell, mut session, _dir) = setup();
    shell.execute("quit", &mut session).await;
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_ai_shows_translated_command() {
    let (shell, mut session, dir) = setup();

    let result = shell.execute("ai where am i", &mut session).await;

    assert!(result.is_success());
    assert_eq!(
        result.output,
        format!("Executing: pwd\n{}", dir.path().display())
    );
}

#[tokio::test]
async fn test_ask_translates_command_shaped_requests() {
    let (shell, mut session, dir) = setup();
    fs::write(dir.path().join("file.txt"), "data").unwrap();
    fs::create_dir(dir.path().join("backup")).unwrap();

    let result = shell
        .execute("ask copy file.txt to backup", &mut session)
        .await;

    assert!(result.output.starts_with("Executing: cp file.txt backup\n"));
    assert!(dir.path().join("backup/file.txt").is_file());
}

#[tokio::test]
async fn test_ai_usage_examples_and_misses() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("ai", &mut session).await;
    assert_eq!(result.exit_code, 1);
    assert!(result.output.starts_with("Usage: ai <natural language query>"));

    let result = shell.execute("ai examples", &mut session).await;
    assert!(result.is_success());
    assert!(result.output.starts_with("Natural Language Examples:\n\n 1. "));

    let result = shell.execute("ai juggle oranges", &mut session).await;
    assert_eq!(result.exit_code, 1);
    assert_eq!(
        result.output,
        "I couldn't understand that query. Type 'ai examples' for example queries."
    );

    // Only the typed lines are recorded, never the translations
    assert_eq!(session.history().len(), 3);
}
