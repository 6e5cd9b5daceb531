//! Error scenario integration tests

use std::io::Write;
use std::process::Command;

fn authvoice_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_authvoice"))
}

#[test]
fn input_file_missing_error() {
    let output = authvoice_bin()
        .args(["--input", "/nonexistent/sample.wav"])
        .env_remove("AUTHVOICE_ENDPOINT")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read") || stderr.contains("nonexistent"),
        "Expected error about unreadable file, got: {}",
        stderr
    );
}

#[test]
fn unreachable_endpoint_error() {
    // A real file avoids the empty-artifact guard; port 1 is never listening
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"RIFF\x00\x00\x00\x00WAVE")
        .expect("Failed to write temp file");

    let output = authvoice_bin()
        .args(["--input"])
        .arg(file.path())
        .args(["--endpoint", "http://127.0.0.1:1"])
        .env_remove("AUTHVOICE_ENDPOINT")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("request") || stderr.contains("Detection") || stderr.contains("failed"),
        "Expected error about the detection request, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = authvoice_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = authvoice_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_duration() {
    let output = authvoice_bin()
        .args(["config", "set", "duration", "invalid"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid") || stderr.contains("invalid") || stderr.contains("duration"),
        "Expected error about invalid duration, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_endpoint() {
    let output = authvoice_bin()
        .args(["config", "set", "endpoint", "localhost:8000"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("http://") || stderr.contains("https://"),
        "Expected error about endpoint scheme, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    // List works without a config file, showing unset keys
    let output = authvoice_bin()
        .args(["config", "list"])
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") || stdout.contains("endpoint"),
        "Expected config list output, got: {}",
        stdout
    );
}
