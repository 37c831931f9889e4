//! CLI smoke tests for the user-registry-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output and the migrate command.

use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the user-registry-server binary with given arguments
fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_user-registry-server"))
        .args(args)
        .env_remove("REGISTRY__DATABASE__URL")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute user-registry-server")
}

/// Write a config whose home dir and log files live under `dir`.
fn write_config(dir: &Path, database_url: Option<&str>) -> String {
    let mut body = format!(
        "server:\n  home_dir: \"{}\"\n  host: \"127.0.0.1\"\n  port: 18080\n",
        dir.join("home").display()
    );
    if let Some(url) = database_url {
        body.push_str(&format!("database:\n  url: \"{url}\"\n"));
    }
    let path = dir.join("registry.yaml");
    std::fs::write(&path, body).expect("Failed to write config");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("user-registry-server"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("migrate"), "Should contain 'migrate' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("user-registry-server 0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Unexpected stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_server(&["--config", "/nonexistent/registry.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").expect("Failed to write file");

    let output = run_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid configuration"),
        "Should mention configuration issue: {stderr}"
    );
}

#[test]
fn test_cli_check_requires_database_url() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), None);

    let output = run_server(&["--config", &config, "check"]);

    assert!(!output.status.success(), "Check should fail without a database");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("database.url is required"), "stderr: {stderr}");
}

#[test]
fn test_cli_check_passes_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), None);

    let output = run_server(&["--config", &config, "--mock", "check"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("sqlite::memory:"));
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), Some("sqlite://registry.db"));

    let output = run_server(&["--config", &config, "--port", "19090", "--print-config"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 19090"));
    assert!(stdout.contains("sqlite://registry.db"));
}

#[test]
fn test_cli_migrate_creates_sqlite_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("data").join("registry.db");
    let url = format!("sqlite://{}", db_path.display());
    let config = write_config(temp_dir.path(), Some(&url));

    let output = run_server(&["--config", &config, "migrate"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Migrations applied"));
    assert!(db_path.is_file(), "SQLite file should be created");
}
