#![allow(unused)]
//! CLI process-level integration harness.
//!
//! # What this covers
//!
//! This harness exercises `labnotes` as a compiled binary via
//! [`std::process::Command`], the way a user or a script would see it.
//!
//! - **Output formats**: `--format json` output is parsed and checked against
//!   the known input; `--format table` prints the rule line and attachments.
//! - **Exit codes**: success = 0; both sources failing = non-zero with the
//!   cause on stderr for `table` and `json`; conflicting flags = non-zero.
//! - **Degraded sources**: a single failing side is reported on stderr while
//!   the other side still renders.
//! - **Empty results**: the table format prints an explicit message.
//! - **Config**: `--config` overrides display settings and author names.
//!
//! # What this does NOT cover
//!
//! - TUI rendering and its retry loop (that requires a real terminal; the
//!   refresh state machine is unit-tested in `labnotes-tui::app`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output};

struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    fn file(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    /// The binary with its config directory pointed inside the sandbox.
    fn labnotes(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_labnotes"));
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"));
        cmd
    }

    fn scenario_files(&self) -> (std::path::PathBuf, std::path::PathBuf) {
        let (legacy, modern) = scenario();
        (
            self.file("legacy.json", &serde_json::to_string(&legacy).unwrap()),
            self.file("modern.json", &serde_json::to_string(&modern).unwrap()),
        )
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Output formats
// ---------------------------------------------------------------------------

#[test]
fn json_output_matches_scenario() {
    let sandbox = Sandbox::new();
    let (legacy, modern) = sandbox.scenario_files();

    let output = sandbox
        .labnotes()
        .args(["--format", "json", "--legacy"])
        .arg(&legacy)
        .arg("--modern")
        .arg(&modern)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["origin"], "legacy");
    assert_eq!(rows[0]["author_display_name"], "P. Aquino");
    assert_eq!(rows[0]["separator_before"], false);
    assert_eq!(rows[1]["origin"], "modern");
    assert_eq!(rows[1]["separator_before"], true);
    assert_eq!(rows[1]["attachments"], serde_json::json!(["x.pdf", "y.pdf"]));
}

#[test]
fn table_output_has_rule_and_attachments() {
    let sandbox = Sandbox::new();
    let (legacy, modern) = sandbox.scenario_files();

    let output = sandbox
        .labnotes()
        .args(["--format", "table", "--legacy"])
        .arg(&legacy)
        .arg("--modern")
        .arg(&modern)
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.matches(" notebook entries ").count(), 1);
    assert!(text.contains("attachments: x.pdf, y.pdf"));
    assert!(text.contains("03/05/2024"));
}

#[test]
fn mixed_file_is_split_by_kind() {
    let sandbox = Sandbox::new();
    let mixed = sandbox.file(
        "mixed.json",
        r#"[
            {"kind":"modern","specimen_number":"L-1","author_name":"Jane Doe","created_at":"2024-03-05T14:08:00Z","attachment":"x.pdf"},
            {"kind":"legacy","specimen_number":"L-1","author_id":"999","created_at":"2024-03-05T14:07:00Z"}
        ]"#,
    );

    let output = sandbox
        .labnotes()
        .args(["--format", "json", "--mixed"])
        .arg(&mixed)
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["author_display_name"], "999");
    assert_eq!(rows[1]["separator_before"], true);
}

#[test]
fn demo_records_render() {
    let sandbox = Sandbox::new();
    let output = sandbox.labnotes().args(["--demo", "--format", "json"]).output().unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Empty results and failures
// ---------------------------------------------------------------------------

#[test]
fn empty_sources_print_message() {
    let sandbox = Sandbox::new();
    let legacy = sandbox.file("legacy.json", "[]");
    let modern = sandbox.file("modern.json", "[]");

    let output = sandbox
        .labnotes()
        .args(["--format", "table", "--legacy"])
        .arg(&legacy)
        .arg("--modern")
        .arg(&modern)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "No notebook entries found.");
}

#[test]
fn one_missing_file_still_succeeds() {
    let sandbox = Sandbox::new();
    let (legacy, _) = sandbox.scenario_files();

    let output = sandbox
        .labnotes()
        .args(["--format", "json", "--legacy"])
        .arg(&legacy)
        .arg("--modern")
        .arg(sandbox.dir.path().join("does-not-exist.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: modern:"), "stderr: {stderr}");
}

#[test]
fn both_sources_failing_exits_nonzero() {
    let sandbox = Sandbox::new();
    let output = sandbox.labnotes().args(["--format", "table"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("all notebook sources failed"), "stderr: {stderr}");
}

#[test]
fn mixed_conflicts_with_split_files() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .labnotes()
        .args(["--mixed", "a.json", "--legacy", "b.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_file_overrides_offset_and_authors() {
    let sandbox = Sandbox::new();
    let (legacy, modern) = sandbox.scenario_files();
    let config = sandbox.file(
        "labnotes.toml",
        "[display]\nutc_offset_minutes = 600\n\n[authors]\n\"210\" = \"Dr. Pilar Aquino\"\n",
    );

    let output = sandbox
        .labnotes()
        .args(["--format", "json", "--config"])
        .arg(&config)
        .arg("--legacy")
        .arg(&legacy)
        .arg("--modern")
        .arg(&modern)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["author_display_name"], "Dr. Pilar Aquino");
    // 14:07 UTC is 00:07 the next day at UTC+10
    assert_eq!(rows[0]["created_date"], "03/06/2024");
    assert_eq!(rows[0]["created_time"], "12:07 AM");
}

#[test]
fn missing_config_file_is_an_error() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .labnotes()
        .args(["--demo", "--format", "json", "--config"])
        .arg(sandbox.dir.path().join("nope.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
