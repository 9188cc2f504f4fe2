//! End-to-end tests for the `fibench` binary.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn fibench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fibench"))
        .args(args)
        .env("RUST_LOG", "fibench=warn")
        .output()
        .expect("failed to launch fibench")
}

fn write_manifest(dir: &Path, body: &str) -> String {
    let path = dir.join("bench.toml");
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

const PASSING: &str = r#"
[benchmark]
name = "Shell smoke test"

[[language]]
name = "sh"
run = ["sh", "-c", "echo 'Sh      | Resultado: 267914296'"]
"#;

#[test]
fn test_list_default_manifest() {
    let output = fibench(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Fibonacci Recursivo (N=42) (expected 267914296, 3 runs, 1 warmup)"));
    assert!(stdout.contains("  rust       target/release/fibonacci\n"));
    assert!(stdout.contains("  python     python3 benchmark.py\n"));
}

#[test]
fn test_run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), PASSING);

    let output = fibench(&[
        "run", "--manifest", &manifest, "--runs", "2", "--warmup", "0", "--format", "json",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["benchmark"], "Shell smoke test");
    assert_eq!(report["runs"], 2);
    assert_eq!(report["warmup"], 0);
    assert_eq!(report["results"][0]["language"], "sh");
    assert_eq!(report["results"][0]["status"], "OK");
    assert!(report["results"][0]["mean_secs"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_run_human_report_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!(
            "{}\n[[language]]\nname = \"liar\"\nrun = [\"sh\", \"-c\", \"echo 'Liar | Resultado: 1'\"]\n",
            PASSING
        ),
    );

    let output = fibench(&["run", "--manifest", &manifest, "--runs", "1"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("=== Shell smoke test | mean of 1 runs ===\n"));
    assert!(stdout.contains("fastest"));
    assert!(stdout.contains("liar (ERROR)\n  unexpected output: Liar | Resultado: 1\n"));
}

#[test]
fn test_only_selects_languages() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!("{}\n[[language]]\nname = \"never\"\nrun = [\"false\"]\n", PASSING),
    );

    let output = fibench(&[
        "run", "--manifest", &manifest, "--only", "sh", "--runs", "1", "--format", "json",
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_language() {
    let output = fibench(&["run", "--only", "cobol"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unknown language 'cobol'"), "{}", stderr);
}

#[test]
fn test_zero_runs_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), PASSING);

    let output = fibench(&["run", "--manifest", &manifest, "--runs", "0"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("benchmark.runs must be at least 1"), "{}", stderr);
}

#[test]
fn test_runs_flag_overrides_zero_runs_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &PASSING.replace("[benchmark]\n", "[benchmark]\nruns = 0\n"),
    );

    let output = fibench(&["run", "--manifest", &manifest, "--runs", "1", "--format", "json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["runs"], 1);
    assert_eq!(report["results"][0]["status"], "OK");

    let output = fibench(&["list", "--manifest", &manifest]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_build_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[language]]
name = "broken"
build = [["sh", "-c", "echo 'missing compiler' >&2; exit 127"]]
run = ["true"]

[[language]]
name = "script"
run = ["true"]
"#,
    );

    let output = fibench(&["build", "--manifest", &manifest]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("broken     FAILED\n  missing compiler\n"), "{}", stdout);
    assert!(stdout.contains("script     nothing to build\n"), "{}", stdout);
}

#[test]
fn test_completions() {
    let output = fibench(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fibench"));
}
