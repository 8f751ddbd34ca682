//! Integration tests for the tracklet CLI.
//!
//! These run the real binary against a temporary workspace.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{create_issue, disable_latency, run_json, run_ok, run_tracklet_in_dir};

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides an initialized workspace with latency disabled
#[fixture]
fn initialized_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    run_ok(temp.path(), &["init", "--prefix", "test", "--quiet"]);
    disable_latency(temp.path());
    temp
}

#[test]
fn test_cli_help_shows_all_commands() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["--help"]);

    for command in ["init", "list", "show", "create", "update", "delete", "stats"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[rstest]
fn test_init_creates_workspace(temp_dir: TempDir) {
    let stdout = run_ok(temp_dir.path(), &["init", "--prefix", "proj"]);

    assert!(stdout.contains("Initialized tracklet"));
    assert!(stdout.contains("Issue prefix: proj"));
    assert!(temp_dir.path().join(".tracklet/config.yaml").is_file());
    assert!(temp_dir.path().join(".tracklet/data").is_dir());
}

#[rstest]
fn test_init_twice_fails(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(initialized_dir.path(), &["init"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already initialized"), "{stderr}");
}

#[rstest]
fn test_commands_outside_workspace_fail(temp_dir: TempDir) {
    let output = run_tracklet_in_dir(temp_dir.path(), &["list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a tracklet repository"), "{stderr}");
}

#[rstest]
fn test_list_shows_seed_issues(initialized_dir: TempDir) {
    let issues = run_json(initialized_dir.path(), &["list"]);
    let ids: Vec<&str> = issues
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[rstest]
fn test_list_filters_and_sorts(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_issue(dir, "Broken export", &["--priority", "high"]);

    let issues = run_json(dir, &["list", "--priority", "high", "--sort", "oldest"]);
    let titles: Vec<&str> = issues
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Login page not responding", "Broken export"]);

    let issues = run_json(dir, &["list", "--search", "DASHBOARD"]);
    assert_eq!(issues.as_array().unwrap().len(), 1);
    assert_eq!(issues[0]["id"], "2");
}

#[rstest]
fn test_list_text_shows_active_filters(initialized_dir: TempDir) {
    let stdout = run_ok(initialized_dir.path(), &["list", "--status", "closed"]);

    assert!(stdout.contains("Filters: Status: Closed"));
    assert!(stdout.contains("Found 1 issue(s)"));
    assert!(stdout.contains("Button alignment issue on mobile"));
}

#[rstest]
fn test_create_show_update_delete(initialized_dir: TempDir) {
    let dir = initialized_dir.path();

    let id = create_issue(dir, "Write docs", &["--status", "in_progress"]);
    assert!(id.starts_with("test-"));

    let shown = run_json(dir, &["show", &id]);
    assert_eq!(shown["title"], "Write docs");
    assert_eq!(shown["status"], "In Progress");
    assert_eq!(shown["priority"], "Medium");

    let updated = run_json(dir, &["update", &id, "--status", "closed"]);
    assert_eq!(updated["status"], "Closed");
    assert_eq!(updated["title"], "Write docs");
    assert_eq!(updated["createdAt"], shown["createdAt"]);

    let deleted = run_json(dir, &["delete", &id]);
    assert_eq!(deleted["deleted"], id.as_str());

    let output = run_tracklet_in_dir(dir, &["show", &id]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("Issue not found: {id}")), "{stderr}");
}

#[rstest]
fn test_create_blank_title_is_rejected(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(
        initialized_dir.path(),
        &["create", "--title", "   ", "--description", "B"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("POST /api/issues: Title is required"), "{stderr}");
}

#[rstest]
fn test_update_without_fields_is_rejected(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(initialized_dir.path(), &["update", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No fields to update"), "{stderr}");
}

#[rstest]
fn test_update_missing_issue(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(initialized_dir.path(), &["update", "nope", "--title", "X"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PUT /api/issues/nope: Issue not found: nope"), "{stderr}");
}

#[rstest]
fn test_delete_missing_issue(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(initialized_dir.path(), &["delete", "nope"]);
    assert!(!output.status.success());
}

#[rstest]
fn test_stats(initialized_dir: TempDir) {
    let stats = run_json(initialized_dir.path(), &["stats"]);

    assert_eq!(stats["total"], 3);
    assert_eq!(stats["open"], 1);
    assert_eq!(stats["inProgress"], 1);
    assert_eq!(stats["closed"], 1);
    assert_eq!(stats["completionPercentage"], 33);

    let stdout = run_ok(initialized_dir.path(), &["stats"]);
    assert!(stdout.contains("Total Issues:  3"));
    assert!(stdout.contains("33%"));
}

#[rstest]
fn test_commands_work_from_subdirectory(initialized_dir: TempDir) {
    let sub_dir = initialized_dir.path().join("src").join("nested");
    std::fs::create_dir_all(&sub_dir).unwrap();

    let issues = run_json(&sub_dir, &["list"]);
    assert_eq!(issues.as_array().unwrap().len(), 3);
}

#[rstest]
fn test_requests_are_logged_to_stderr(initialized_dir: TempDir) {
    let output = run_tracklet_in_dir(initialized_dir.path(), &["--json", "show", "1"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API request"), "{stderr}");
    assert!(stderr.contains("/api/issues/1"), "{stderr}");

    // stdout stays pure JSON
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<serde_json::Value>(&stdout).unwrap();
}

#[rstest]
fn test_corrupted_data_is_reported(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    run_ok(dir, &["list"]);
    std::fs::write(dir.join(".tracklet/data/issue-tracker-data.json"), "{oops").unwrap();

    let output = run_tracklet_in_dir(dir, &["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is corrupted"), "{stderr}");
}
