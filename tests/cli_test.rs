//! Integration tests for startup behavior
//!
//! Manifest and overlay loading, `--list`, unknown task names. None of these
//! runs an external tool.

mod common;

use common::{stderr, stdout, TestProject};

const META_ONLY: &str = r#"
[[task]]
name = "base"

[[task]]
name = "extras"
depends = ["base"]
"#;

#[test]
fn test_list_shows_every_task() {
    let project = TestProject::with_manifest(&common::two_task_manifest());
    let output = project.run(&["--list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Available tasks:"));
    assert!(out.contains("zlib: no dependencies (git+https://example.com/zlib.git)"));
    assert!(out.contains("app: zlib (git+https://example.com/app.git)"));
    // Synthesized default task
    assert!(out.contains("all: zlib, app (meta task)"));
}

#[test]
fn test_list_does_not_create_sources() {
    let project = TestProject::with_manifest(&common::two_task_manifest());
    let output = project.run(&["-l"]);

    assert!(output.status.success());
    assert!(!project.file_exists("src"));
}

#[test]
fn test_unknown_task_prints_listing_and_succeeds() {
    let project = TestProject::with_manifest(META_ONLY);
    let output = project.run(&["nope"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Unknown task 'nope'"));
    let out = stdout(&output);
    assert!(out.contains("Available tasks:"));
    assert!(out.contains("extras: base (meta task)"));
}

#[test]
fn test_unknown_task_does_not_stop_later_requests() {
    let project = TestProject::with_manifest(META_ONLY);
    let output = project.run(&["nope", "extras"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("Unknown task 'nope'"));
    assert!(stdout(&output).contains("Done: 0 built, 0 up to date"));
}

#[test]
fn test_meta_only_manifest_runs_default_task() {
    let project = TestProject::with_manifest(META_ONLY);
    let output = project.run(&[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Done: 0 built, 0 up to date"));
}

#[test]
fn test_quiet_prints_nothing() {
    let project = TestProject::with_manifest(META_ONLY);
    let output = project.run(&["-q"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_manifest_fails() {
    let project = TestProject::new();
    let output = project.run(&[]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Manifest not found"));
}

#[test]
fn test_malformed_manifest_fails() {
    let project = TestProject::with_manifest("[[task]\nname = ");
    let output = project.run(&["--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse manifest"));
}

#[test]
fn test_missing_dependency_fails_before_running() {
    let project = TestProject::with_manifest(
        r#"
[[task]]
name = "app"
depends = ["ghost"]
"#,
    );
    let output = project.run(&["--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Missing dependency: 'ghost' required by 'app'"));
}

#[test]
fn test_dependency_cycle_fails() {
    let project = TestProject::with_manifest(
        r#"
[[task]]
name = "a"
depends = ["b"]

[[task]]
name = "b"
depends = ["a"]
"#,
    );
    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Dependency cycle detected"));
}

#[test]
fn test_malformed_overlay_is_fatal() {
    let project = TestProject::with_manifest(&common::two_task_manifest());
    project.write_overlay("{ \"zlib\": { \"configure\": ");
    let output = project.run(&["--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("overrides.json"));
    assert!(!project.file_exists("src"));
}

#[test]
fn test_overlay_path_can_be_given_explicitly() {
    let project = TestProject::with_manifest(META_ONLY);
    project.create_file("broken.json", "not json");
    let output = project.run(&["--config", "broken.json", "--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("broken.json"));
}

#[test]
fn test_custom_default_task() {
    let project = TestProject::with_manifest(
        r#"
[settings]
default_task = "extras"

[[task]]
name = "base"

[[task]]
name = "extras"
depends = ["base"]
"#,
    );
    let output = project.run(&["--list"]);

    assert!(output.status.success());
    // An explicit default task is not synthesized again
    assert!(!stdout(&output).contains("all:"));
}
