use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn scanbench(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scanbench"))
        .args(args)
        .current_dir(dir)
        .env_remove("SCANBENCH_CONFIG")
        .env_remove("SCANBENCH_LOG_DIR")
        .output()
        .unwrap()
}

#[test]
fn test_no_arguments_is_usage_error() {
    let dir = tempdir().unwrap();
    let out = scanbench(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Usage"), "stderr: {err}");
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unknown_command_is_named() {
    let dir = tempdir().unwrap();
    let out = scanbench(dir.path(), &["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("frobnicate"), "stderr: {err}");
}

#[test]
fn test_scan_missing_arguments_is_usage_error() {
    let dir = tempdir().unwrap();
    let out = scanbench(dir.path(), &["scan", "only-a-label"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let dir = tempdir().unwrap();
    let out = scanbench(dir.path(), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("csvs"));
}

#[test]
fn test_csvs_uses_config_file_from_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scanbench.toml"), "row_count = 25\nrow_sizes = [16, 128]\n").unwrap();
    let out = scanbench(dir.path(), &["csvs"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Wrote scan_0016.csv ("));
    assert!(stdout.contains("Wrote scan_0128.csv ("));
    for name in ["scan_0016.csv", "scan_0128.csv"] {
        let s = fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(s.lines().count(), 25);
    }
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scanbench.toml"), "run_count = 0\n").unwrap();
    let out = scanbench(dir.path(), &["csvs"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("run_count"));
}

#[test]
fn test_scan_connection_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let out = scanbench(dir.path(), &["scan", "nowhere", "postgres://bench@127.0.0.1:1/bench"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: "));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
