//! Integration Tests for File Operations
//!
//! File commands typed directly and reached through plain-English requests,
//! all relative to the session directory.

use plainsh::{Config, SessionContext, Shell};
use std::fs;
use tempfile::TempDir;

fn setup() -> (Shell, SessionContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let session = SessionContext::new(dir.path());
    (Shell::new(Config::default()), session, dir)
}

#[tokio::test]
async fn test_create_list_and_remove() {
    let (shell, mut session, dir) = setup();

    assert!(shell.execute("mkdir -p src/bin", &mut session).await.is_success());
    assert!(shell.execute("touch README.md", &mut session).await.is_success());

    let result = shell.execute("ls", &mut session).await;
    assert_eq!(result.output, "README.md  src");

    assert!(shell.execute("rm -r src", &mut session).await.is_success());
    assert!(!dir.path().join("src").exists());
}

#[tokio::test]
async fn test_operations_follow_cd() {
    let (shell, mut session, dir) = setup();
    fs::create_dir(dir.path().join("docs")).unwrap();

    shell.execute("cd docs", &mut session).await;
    shell.execute("touch notes.txt", &mut session).await;

    assert!(dir.path().join("docs/notes.txt").is_file());
}

#[tokio::test]
async fn test_copy_move_and_read() {
    let (shell, mut session, dir) = setup();
    fs::write(dir.path().join("draft.txt"), "first line\n").unwrap();

    shell.execute("cp draft.txt copy.txt", &mut session).await;
    shell.execute("mv copy.txt final.txt", &mut session).await;

    let result = shell.execute("cat final.txt", &mut session).await;
    assert_eq!(result.output, "first line\n");
    assert!(!dir.path().join("copy.txt").exists());
}

#[tokio::test]
async fn test_quoted_names_with_spaces() {
    let (shell, mut session, dir) = setup();

    shell.execute("mkdir \"my project\"", &mut session).await;

    assert!(dir.path().join("my project").is_dir());
}

#[tokio::test]
async fn test_requests_reach_file_backend() {
    let (shell, mut session, dir) = setup();

    shell
        .execute("make a directory named my project", &mut session)
        .await;
    assert!(dir.path().join("my project").is_dir());

    let result = shell.execute("remove folder called \"my project\"", &mut session).await;
    assert!(result.is_success(), "{}", result.output);
    assert!(!dir.path().join("my project").exists());
}

#[tokio::test]
async fn test_delete_bareword_removes_tree() {
    let (shell, mut session, dir) = setup();
    fs::create_dir_all(dir.path().join("project/src")).unwrap();
    fs::write(dir.path().join("project/src/lib.rs"), "").unwrap();

    let result = shell.execute("delete project", &mut session).await;

    assert!(result.is_success(), "{}", result.output);
    assert!(!dir.path().join("project").exists());
}

#[tokio::test]
async fn test_listing_request_in_subdirectory() {
    let (shell, mut session, dir) = setup();
    fs::create_dir(dir.path().join("reports")).unwrap();
    fs::write(dir.path().join("reports/q1.csv"), "").unwrap();

    let result = shell
        .execute("what's in the reports folder?", &mut session)
        .await;

    assert_eq!(result.output, "q1.csv");
}

#[tokio::test]
async fn test_head_tail_wc_with_input_redirection() {
    let (shell, mut session, dir) = setup();
    let content: String = (1..=12).map(|n| format!("row {}\n", n)).collect();
    fs::write(dir.path().join("rows.txt"), content).unwrap();

    let result = shell.execute("head -n 2 < rows.txt", &mut session).await;
    assert_eq!(result.output, "row 1\nrow 2");

    let result = shell.execute("tail -n 1 rows.txt", &mut session).await;
    assert_eq!(result.output, "row 12");

    let result = shell.execute("wc -l < rows.txt", &mut session).await;
    assert_eq!(result.output, "12 rows.txt");
}

#[tokio::test]
async fn test_file_output_redirected_to_file() {
    let (shell, mut session, dir) = setup();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();

    let result = shell.execute("ls > listing.out", &mut session).await;
    assert!(result.output.is_empty());

    let written = fs::read_to_string(dir.path().join("listing.out")).unwrap();
    assert!(written.starts_with("a.txt  b.txt"));
    assert!(written.ends_with('\n'));
}
