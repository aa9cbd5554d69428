use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn contacts_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_contacts"))
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("contacts.toml");
    fs::write(&path, content).unwrap();
    path
}

fn run_contacts(config_path: Option<&Path>, args: &[&str]) -> (String, String, bool) {
    let binary = contacts_binary();
    let mut cmd = Command::new(&binary);
    if let Some(path) = config_path {
        cmd.arg("--config").arg(path);
    }
    let output = cmd
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run contacts binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_openapi_prints_document() {
    let (stdout, stderr, success) = run_contacts(None, &["openapi"]);
    assert!(success, "openapi failed: stderr={}", stderr);

    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["openapi"], "3.0.3");
    assert!(doc["paths"]["/api/contacts"]["get"].is_object());
    assert!(doc["paths"]["/api/contacts"]["post"].is_object());
    assert!(doc["components"]["schemas"]["Contact"].is_object());
}

#[test]
fn test_serve_rejects_invalid_seed() {
    let tmp = TempDir::new().unwrap();
    let config_path = write_config(
        &tmp,
        r#"
[server]
bind = "127.0.0.1:0"

[[contacts]]
id = 1
firstName = "Alan"
"#,
    );

    let (_, stderr, success) = run_contacts(Some(&config_path), &["serve"]);
    assert!(!success, "serve should fail on an invalid seed");
    assert!(stderr.contains("invalid seed contact 1"), "stderr={}", stderr);
}

#[test]
fn test_serve_rejects_bad_bind_override() {
    let (_, stderr, success) = run_contacts(None, &["serve", "--bind", "not-an-address"]);
    assert!(!success);
    assert!(stderr.contains("server.bind"), "stderr={}", stderr);
}

#[test]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (_, stderr, success) = run_contacts(Some(&missing), &["serve"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"), "stderr={}", stderr);
}
