//! Integration tests for truely CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::io::Write;
use std::path::Path;
use std::process::Command;

const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

fn fixture_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"abc").expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn run_truely(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_truely"))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute 'truely {}': {}", args.join(" "), e))
}

/// Run truely with HOME and the working directory pointed at `dir`, so only
/// a config written there is picked up.
fn run_truely_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_truely"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute 'truely {}': {}", args.join(" "), e))
}

fn parse_json_stdout(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit code {:?}, stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// =============================================================================
// hash
// =============================================================================

#[test]
fn test_hash_prints_digest_on_stdout() {
    let file = fixture_file();
    let path = file.path().to_string_lossy().into_owned();

    let output = run_truely(&["hash", &path]);
    assert!(
        output.status.success(),
        "truely hash failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with(ABC_SHA256),
        "stdout should start with the digest, got: {}",
        stdout
    );
}

#[test]
fn test_default_mode_suppresses_info_logs() {
    let file = fixture_file();
    let path = file.path().to_string_lossy().into_owned();

    let output = run_truely(&["hash", &path]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should suppress INFO logs, but stderr contains: {}",
        stderr
    );
    assert!(
        !stderr.contains(r#""level":"DEBUG""#),
        "Default mode should suppress DEBUG logs, but stderr contains: {}",
        stderr
    );
}

#[test]
fn test_verbose_mode_emits_json_logs_on_stderr() {
    let file = fixture_file();
    let path = file.path().to_string_lossy().into_owned();

    let output = run_truely(&["-v", "hash", &path]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cli.hash_completed"),
        "Verbose mode should log the hash event, stderr: {}",
        stderr
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains(r#""level""#),
        "stdout must not contain log lines: {}",
        stdout
    );
}

#[test]
fn test_hash_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bin");

    let output = run_truely(&["hash", &missing.to_string_lossy()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to hash"),
        "stderr should explain the failure: {}",
        stderr
    );
}

// =============================================================================
// windows
// =============================================================================

#[test]
fn test_windows_rejects_invalid_pid() {
    let output = run_truely(&["windows", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid PID: 0"));
}

#[cfg(target_os = "macos")]
#[test]
fn test_windows_json_for_current_process() {
    let pid = std::process::id().to_string();
    let output = run_truely(&["windows", &pid, "--json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(report["properties"]["window_count"].is_u64());
    assert!(report["windows"].is_array());
}

#[cfg(not(target_os = "macos"))]
#[test]
fn test_windows_without_window_server_fails() {
    let pid = std::process::id().to_string();
    let output = run_truely(&["windows", &pid, "--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Window server unavailable"),
        "stderr should report the missing window server: {}",
        stderr
    );
}

// =============================================================================
// processes
// =============================================================================

#[test]
fn test_processes_json_records_are_well_formed() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse_json_stdout(&run_truely_in(dir.path(), &["processes", "--json"]));
    let records = records.as_array().expect("processes --json should print an array");
    assert!(!records.is_empty());

    for record in records {
        let pid = record["pid"].as_i64().expect("pid should be a number");
        assert!(pid > 0, "record with non-positive pid: {}", record);
        assert!(!record["name"].as_str().unwrap_or_default().is_empty());

        let suspicious = record["suspicious_window_count"]
            .as_u64()
            .expect("suspicious_window_count should be a number");
        assert!(suspicious <= 1, "bad suspicious_window_count: {}", record);
    }

    let own = i64::from(std::process::id());
    assert!(
        records.iter().any(|r| r["pid"].as_i64() == Some(own)),
        "the test process should be listed"
    );
}

#[test]
fn test_processes_suspicious_filter() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse_json_stdout(&run_truely_in(
        dir.path(),
        &["processes", "--json", "--suspicious"],
    ));
    for record in records.as_array().expect("array") {
        assert_eq!(record["suspicious_window_count"], 1);
    }
}

// =============================================================================
// scan
// =============================================================================

#[test]
fn test_scan_json_reports_configured_name() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".truely");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[watchlist]\nnames = [\"truely\"]\n",
    )
    .unwrap();

    let hits = parse_json_stdout(&run_truely_in(dir.path(), &["scan", "--json"]));
    let hits = hits.as_array().expect("scan --json should print an array");

    assert!(
        hits.iter().any(|hit| hit["kind"] == "name"
            && hit["name"].as_str().unwrap_or_default().contains("truely")),
        "the running truely process should match its own name: {:?}",
        hits
    );
    for hit in hits {
        assert!(hit["pid"].as_i64().unwrap_or_default() > 0);
    }
}

#[test]
fn test_scan_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".truely");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[watchlist]\nhashes = [\"abc\"]\n").unwrap();

    let output = run_truely_in(dir.path(), &["scan"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

// =============================================================================
// usage
// =============================================================================

#[test]
fn test_no_subcommand_shows_help() {
    let output = run_truely(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}
