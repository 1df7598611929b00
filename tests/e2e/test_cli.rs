//! Integration tests for the nnplot binary.
//!
//! These tests run the compiled binary on the demo descriptions and inspect
//! the JSON layout it prints.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nnplot"))
}

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("demos");
    path.push(name);
    path
}

/// Run the binary with optional stdin input and CLI args.
fn run(input: Option<&str>, args: &[&str]) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run binary");
    if let Some(mut stdin) = child.stdin.take() {
        if let Some(text) = input {
            stdin.write_all(text.as_bytes()).expect("write stdin");
        }
    }
    child.wait_with_output().expect("Failed to wait for binary")
}

fn run_ok(input: Option<&str>, args: &[&str]) -> (Value, String) {
    let output = run(input, args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    let json = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    (json, String::from_utf8_lossy(&output.stderr).into_owned())
}

#[test]
fn test_policy_network_layout() {
    let path = demo("policy_network.json");
    let (json, stderr) = run_ok(None, &[path.to_str().unwrap()]);
    assert_eq!(json["name"], "policy_network");
    assert_eq!(json["column_count"], 5);
    assert_eq!(json["layers"].as_array().unwrap().len(), 6);
    assert_eq!(json["connections"].as_array().unwrap().len(), 288);
    assert!(json["warnings"].as_array().unwrap().is_empty());
    assert!(stderr.is_empty(), "unexpected stderr: {stderr}");

    let hidden = &json["layers"][1];
    assert_eq!(hidden["slots"].as_array().unwrap().len(), 9);
    assert_eq!(hidden["slots"][4]["source"]["kind"], "collapsed");
    assert_eq!(hidden["slots"][4]["source"]["first"], 4);
    assert_eq!(hidden["slots"][4]["source"]["last"], 295);

    let input = &json["layers"][0];
    assert_eq!(input["style"]["neuron"]["fill_color"], "#FFD700");
    assert_eq!(input["style"]["box"]["enabled"], true);
    assert_eq!(input["style"]["box"]["edge_color"], "#B8860B");
    assert_eq!(input["slots"][0]["label"], "q_m");
}

#[test]
fn test_reads_stdin() {
    let text = fs::read_to_string(demo("critic_network.json")).unwrap();
    let (json, _) = run_ok(Some(&text), &["--compact"]);
    assert_eq!(json["name"], "critic_network");
    assert_eq!(json["connections"].as_array().unwrap().len(), 184);
}

#[test]
fn test_unmatched_style_key_warns() {
    let path = demo("critic_network.json");
    let (json, stderr) = run_ok(None, &[path.to_str().unwrap()]);
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "unmatched_key");
    assert_eq!(warnings[0]["key"], "Critic_Head");
    assert!(stderr.contains("matches no layer"), "stderr: {stderr}");
}

#[test]
fn test_cli_overrides_collapse_threshold() {
    let path = demo("critic_network.json");
    let (json, _) = run_ok(None, &[path.to_str().unwrap(), "--max-per-layer", "400"]);
    assert_eq!(json["layers"][1]["slots"].as_array().unwrap().len(), 300);
}

#[test]
fn test_spacing_multiplier_flag() {
    let path = demo("critic_network.json");
    let (json, _) = run_ok(None, &[path.to_str().unwrap(), "-s", "2"]);
    assert_eq!(json["layers"][1]["x"], 6.0);
}

#[test]
fn test_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("layout.json");
    let path = demo("critic_network.json");
    let output = run(None, &[path.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["column_count"], 5);
}

#[test]
fn test_unknown_parent_exit() {
    let output = run(
        Some(r#"{ "layers": [ { "name": "A", "size": 1 }, { "size": 1, "parents": ["B"] } ] }"#),
        &[],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no layer named 'B'"), "stderr: {stderr}");
}

#[test]
fn test_malformed_input_exit() {
    let output = run(Some("not json"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}
