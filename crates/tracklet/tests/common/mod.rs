//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the tracklet binary built for this test run
pub fn tracklet_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tracklet"))
}

/// Run the tracklet binary in the specified directory.
///
/// Colors are disabled so assertions can match plain text.
pub fn run_tracklet_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(tracklet_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tracklet binary")
}

/// Run a command that must succeed and return its stdout.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_tracklet_in_dir(dir, args);
    assert!(
        output.status.success(),
        "tracklet {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run a command with `--json` that must succeed and parse its stdout.
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_ok(dir, &full);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

/// Turn off the simulated latency in an initialized workspace.
pub fn disable_latency(dir: &Path) {
    let path = dir.join(".tracklet").join("config.yaml");
    let content = std::fs::read_to_string(&path).unwrap();
    let updated = content.replace("latency_ms: 300", "latency_ms: 0");
    assert_ne!(content, updated, "latency setting not found in config");
    std::fs::write(&path, updated).unwrap();
}

/// Create an issue through the CLI and return its ID.
pub fn create_issue(dir: &Path, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["create", "--title", title, "--description", "Created by a test"];
    args.extend_from_slice(extra);
    let issue = run_json(dir, &args);
    issue["id"].as_str().unwrap().to_string()
}
