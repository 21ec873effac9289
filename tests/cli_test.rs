//! Runs the built binary the way a container entrypoint would

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn envject(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envject"))
        .current_dir(dir)
        .env_clear()
        .envs(env.iter().copied())
        .args(args)
        .output()
        .expect("failed to run envject")
}

fn project(manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("secrets")).unwrap();
    fs::write(dir.path().join("secrets.yaml"), manifest).unwrap();
    dir
}

const GENERATE: &[&str] = &[
    "generate",
    "--secrets-dir",
    "secrets",
    "--output",
    "html/env-config.js",
];

#[test]
fn test_generate_success_exits_zero() {
    let dir = project("secrets:\n  - APP_NAME\n  - API_URL\n");
    fs::write(dir.path().join("secrets/APP_NAME"), "Acme\n").unwrap();

    let output = envject(dir.path(), GENERATE, &[("API_URL", "https://api.example.com")]);

    assert_eq!(output.status.code(), Some(0));
    let artifact = fs::read_to_string(dir.path().join("html/env-config.js")).unwrap();
    assert!(artifact.contains("env[\"APP_NAME\"] = \"Acme\";"));
    assert!(artifact.contains("env[\"API_URL\"] = \"https://api.example.com\";"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("APP_NAME: resolved from secret file"));
    assert!(!stderr.contains("Acme"));
}

#[test]
fn test_generate_unresolved_key_exits_nonzero_without_artifact() {
    let dir = project("secrets:\n  - APP_NAME\n");

    let output = envject(dir.path(), GENERATE, &[]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("APP_NAME"));
    assert!(!dir.path().join("html/env-config.js").exists());
}

#[test]
fn test_generate_missing_manifest() {
    let dir = TempDir::new().unwrap();

    let output = envject(dir.path(), GENERATE, &[]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_dry_run_prints_artifact() {
    let dir = project("secrets: [APP_NAME]\n");

    let mut args = GENERATE.to_vec();
    args.push("--dry-run");
    let output = envject(dir.path(), &args, &[("APP_NAME", "Acme")]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("env[\"APP_NAME\"] = \"Acme\";"));
    assert!(!dir.path().join("html").exists());
}

#[test]
fn test_check_reports_missing_keys() {
    let dir = project("secrets: [APP_NAME, API_URL]\n");
    fs::write(dir.path().join("secrets/APP_NAME"), "Acme").unwrap();

    let output = envject(
        dir.path(),
        &["check", "--secrets-dir", "secrets", "--json"],
        &[],
    );

    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!([
            {"key": "APP_NAME", "source": "secret_file"},
            {"key": "API_URL", "source": null},
        ])
    );
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let dir = project("secrets: [APP_NAME]\n");
    fs::write(
        dir.path().join("envject.toml"),
        "[sources]\nsecrets_dir = \"secrets\"\n\n[artifact]\npath = \"public/runtime.js\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("secrets/APP_NAME"), "Acme").unwrap();

    let output = envject(dir.path(), &["generate"], &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("public/runtime.js").exists());
}
