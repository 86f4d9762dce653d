//! Runs the built `innkeeper` binary in an isolated home and working directory.

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn innkeeper(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_innkeeper"))
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("GROQ_API_KEY")
        .env_remove("INNKEEPER_MODEL")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run innkeeper")
}

#[test]
fn test_help_describes_the_tool() {
    let home = TempDir::new().unwrap();
    let out = innkeeper(&home, &["--help"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("answered from its own website"), "stdout: {stdout}");
    assert!(stdout.contains("innkeeper"), "stdout: {stdout}");
}

#[test]
fn test_chat_requires_terminal() {
    let home = TempDir::new().unwrap();
    let out = innkeeper(&home, &["chat"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("interactive terminal"), "stderr: {stderr}");
}

#[test]
fn test_ask_requires_question() {
    let home = TempDir::new().unwrap();
    let out = innkeeper(&home, &["ask"]);
    assert!(!out.status.success());
}

#[test]
fn test_ask_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    let out = innkeeper(&home, &["ask", "What", "food", "is", "served?"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("GROQ_API_KEY") || stderr.contains("groq"), "stderr: {stderr}");
}

#[test]
fn test_config_show_json_hides_key() {
    let home = TempDir::new().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_innkeeper"))
        .args(["config", "show", "--output", "json"])
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("GROQ_API_KEY", "gsk_secret_value")
        .env("INNKEEPER_URL", "https://hotel.test/")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run innkeeper");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("gsk_secret_value"));

    let line = stdout.lines().last().unwrap();
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["level"], "data");
    assert_eq!(json["data"]["url"], "https://hotel.test/");
    assert_eq!(json["data"]["api_key_configured"], true);
    assert_eq!(json["data"]["excerpt_limit"], 4000);
}

#[test]
fn test_project_env_file_is_loaded() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".env"),
        "INNKEEPER_MODEL=llama-3.3-70b-versatile\n",
    )
    .unwrap();

    let out = innkeeper(&home, &["config", "show", "--output", "json"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(json["data"]["model"], "llama-3.3-70b-versatile");
    assert_eq!(json["data"]["api_key_configured"], false);
}

#[test]
fn test_unknown_provider_is_rejected() {
    let home = TempDir::new().unwrap();
    let out = innkeeper(&home, &["ask", "--provider", "nope", "hi"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown provider 'nope'"), "stderr: {stderr}");
}
