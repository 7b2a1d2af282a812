//! Command-line binary tests.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn write_source(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("minijs-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("write source");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_minijs"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run minijs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_tokens_prints_json() {
    let path = write_source("tokens.js", "let x = 1\n");
    let output = run(&["tokens", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let tokens: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(tokens.as_array().map(Vec::len), Some(8));
    assert_eq!(tokens[0]["kind"], "Keyword");
}

#[test]
fn cli_ast_json() {
    let path = write_source("ast.js", "const x = 42;");
    let output = run(&["ast", "--compact", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1);
    let program: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(program["body"][0]["type"], "VariableDeclaration");
}

#[test]
fn cli_ast_tree_infix() {
    let path = write_source("infix.js", "a + b * c");
    let output = run(&["ast", "--infix", "--format", "tree", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Program 1:0-1:9\n"));
    assert!(text.contains("BinaryExpression +"));
}

#[test]
fn cli_check_reports_statement_count() {
    let path = write_source("check.js", "let a\nlet b\n");
    let output = run(&["check", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("valid (2 statement(s))"));
}

#[test]
fn cli_check_fails_on_parse_error() {
    let path = write_source("bad.js", "const ;");
    let output = run(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("expected identifier, found ';'"));
}

#[test]
fn cli_missing_file() {
    let output = run(&["check", "/nonexistent/minijs/input.js"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("input.js"));
}

#[test]
fn cli_requires_files() {
    let output = run(&["tokens"]);
    assert_eq!(output.status.code(), Some(2));
}
