//! Integration Tests for Error Handling
//!
//! Every failure comes back as a one-line message and a non-zero exit code;
//! the session always survives.

use plainsh::{Config, SessionContext, Shell};
use std::fs;
use tempfile::TempDir;

fn setup() -> (Shell, SessionContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = SessionContext::new(dir.path());
    (Shell::new(Config::default()), session, dir)
}

#[tokio::test]
async fn test_missing_file_is_reported_not_raised() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("cat ghost.txt", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "cat: ghost.txt: No such file or directory");
    assert!(session.is_running());
}

#[tokio::test]
async fn test_missing_operand() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("rm", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert!(result.output.starts_with("rm: "));
}

#[tokio::test]
async fn test_missing_input_file() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("sort < absent.txt", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "sort: absent.txt: No such file or directory");
}

#[tokio::test]
async fn test_unwritable_redirect_target() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("pwd > nodir/out.txt", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(
        result.output,
        "plainsh: nodir/out.txt: No such file or directory"
    );
}

#[tokio::test]
async fn test_unbalanced_quotes_still_dispatch() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("echo 'unclosed", &mut session).await;

    assert!(result.is_success());
    assert_eq!(result.output, "'unclosed\n");
}

#[tokio::test]
async fn test_external_exit_codes_pass_through() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("sh -c \"exit 3\"", &mut session).await;
    assert_eq!(result.exit_code, 3);

    let result = shell.execute("false", &mut session).await;
    assert_eq!(result.exit_code, 1);
}

#[tokio::test]
async fn test_stderr_is_part_of_output() {
    let (shell, mut session, _dir) = setup();

    let result = shell
        .execute("sh -c \"echo out; echo err >&2\"", &mut session)
        .await;

    assert_eq!(result.output, "out\n\nerr\n");
}

#[tokio::test]
async fn test_rm_refuses_dot() {
    let (shell, mut session, dir) = setup();
    fs::write(dir.path().join("keep.txt"), "").unwrap();

    let result = shell.execute("rm -rf .", &mut session).await;

    assert_eq!(result.exit_code, 1);
    assert!(dir.path().join("keep.txt").exists());
}

#[tokio::test]
async fn test_invalid_kill_target() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("kill notapid", &mut session).await;

    assert_ne!(result.exit_code, 0);
    assert!(result.output.starts_with("kill: "));
}

#[tokio::test]
async fn test_session_keeps_running_after_failures() {
    let (shell, mut session, dir) = setup();

    for line in [
        "nonexistent_cmd_xyz",
        "cd /definitely/not/here",
        "cat",
        "could you juggle",
        "ls missing",
    ] {
        let result = shell.execute(line, &mut session).await;
        assert_ne!(result.exit_code, 0, "{}", line);
    }

    assert!(session.is_running());
    assert_eq!(session.current_directory(), dir.path());
    assert_eq!(session.history().len(), 5);
}

#[tokio::test]
async fn test_blank_lines_do_nothing() {
    let (shell, mut session, _dir) = setup();

    let result = shell.execute("   ", &mut session).await;

    assert!(result.is_success());
    assert!(result.output.is_empty());
    assert!(session.history().is_empty());
}
