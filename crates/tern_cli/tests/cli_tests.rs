//! End-to-end tests for the `tern` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

// ============================================================================
// Helpers
// ============================================================================

/// Write `text` to a fresh file under the temp dir.
fn source_file(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tern-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn tern(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tern"))
        .args(args)
        .env_remove("TERN_LOG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn test_clean_file_exits_zero() {
    let path = source_file("clean.ts", "const x: number = 1;\n");
    let output = tern(&["parse", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stderr(&output).contains("0 syntax errors"));
}

#[test]
fn test_syntax_error_exits_two() {
    let path = source_file("broken.ts", "let x = ;\n");
    let output = tern(&["parse", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Expression expected."));
}

#[test]
fn test_json_dump() {
    let path = source_file("dump.ts", "x;");
    let output = tern(&["parse", "--json", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["tree"][0]["kind"], "SourceFile");
    assert_eq!(json[0]["nodeCount"].as_u64().map(|n| n > 0), Some(true));
}

#[test]
fn test_missing_file_fails() {
    let output = tern(&["parse", "/nonexistent/tern/missing.ts"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tern::io"));
}

#[test]
fn test_invalid_utf8_fails() {
    let dir = source_file("placeholder.ts", "").with_file_name("latin1.ts");
    std::fs::write(&dir, [b'x', b'=', 0xff, b';']).unwrap();
    let output = tern(&["parse", dir.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tern::encoding"));
}

// ============================================================================
// edit
// ============================================================================

#[test]
fn test_edit_verifies_against_full_parse() {
    let path = source_file("edit.ts", "function f() { return 1; }\nlet y = 2;\n");
    let output = tern(&["edit", path.to_str().unwrap(), "--start", "22", "--delete", "1", "--insert", "42", "--verify"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stderr(&output).contains("reused"));
}

#[test]
fn test_edit_out_of_range_fails() {
    let path = source_file("short.ts", "x;");
    let output = tern(&["edit", path.to_str().unwrap(), "--start", "10", "--insert", "y"]);
    assert_eq!(output.status.code(), Some(1));
}
