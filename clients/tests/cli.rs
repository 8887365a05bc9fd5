//! End-to-end tests of the client binaries.
//!
//! Each test runs the compiled binary with `assert_cmd` inside a fresh
//! temporary directory.

use std::fs;

use assert_cmd::Command;

#[allow(deprecated)]
fn bin(name: &str) -> Command {
    Command::cargo_bin(name).expect("binary should exist")
}

#[test]
fn gen_writes_dimension_three() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.txt");

    bin("swizzle-gen")
        .arg("3")
        .arg(&out)
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read output");
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines[0], "Swizzle<T, Dim, Packed, 0> x;");
    assert_eq!(
        &lines[..3],
        [
            "Swizzle<T, Dim, Packed, 0> x;",
            "Swizzle<T, Dim, Packed, 1> y;",
            "Swizzle<T, Dim, Packed, 2> z;"
        ]
    );
    assert_eq!(lines.len(), 120);
}

#[test]
fn gen_twice_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.txt");

    bin("swizzle-gen").arg("2").arg(&out).assert().success();
    let once = fs::read(&out).expect("read");
    bin("swizzle-gen").arg("2").arg(&out).assert().success();
    let twice = fs::read(&out).expect("read");

    assert_eq!(once, twice);
    assert_eq!(String::from_utf8_lossy(&once).split('\n').count(), 30);
}

#[test]
fn gen_rejects_invalid_dimension_without_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.txt");

    let output = bin("swizzle-gen")
        .arg("5")
        .arg(&out)
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid dimension 5"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn gen_fails_on_missing_parent_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("absent").join("out.txt");

    let output = bin("swizzle-gen")
        .arg("1")
        .arg(&out)
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot write"));
    assert!(!out.exists());
}

#[test]
fn gen_check_reports_freshness() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.txt");

    bin("swizzle-gen")
        .args(["4", "--check"])
        .arg(&out)
        .assert()
        .failure();
    assert!(!out.exists(), "--check must not write");

    bin("swizzle-gen").arg("4").arg(&out).assert().success();
    bin("swizzle-gen")
        .args(["4", "--check"])
        .arg(&out)
        .assert()
        .success();

    fs::write(&out, "stale").expect("overwrite");
    bin("swizzle-gen")
        .args(["4", "--check"])
        .arg(&out)
        .assert()
        .failure();
}

#[test]
fn gen_all_then_conformance_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("SwizzleInc");

    bin("swizzle-gen-all")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    for d in 1..=4 {
        assert!(out.join(format!("Swizzle{d}.hpp.inc")).is_file());
    }

    bin("swizzle-conformance")
        .arg("--dir")
        .arg(&out)
        .assert()
        .success();
}

#[test]
fn gen_all_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("SwizzleInc");

    let output = bin("swizzle-gen-all")
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["declaration_count"], 494);
    assert_eq!(report["files"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["files"][1]["dimension"], 2);
    assert_eq!(report["files"][1]["line_count"], 30);
}

#[test]
fn conformance_fails_on_tampered_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("SwizzleInc");
    bin("swizzle-gen-all").arg("--out").arg(&out).assert().success();

    let path = out.join("Swizzle2.hpp.inc");
    let tampered = fs::read_to_string(&path)
        .expect("read")
        .replacen("0, 1> xy;", "1, 0> xy;", 1);
    fs::write(&path, tampered).expect("write");

    let output = bin("swizzle-conformance")
        .arg("--dir")
        .arg(&out)
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[FAIL] declarations/consistency Swizzle2.hpp.inc"));
}

#[test]
fn stale_check_logs_a_warning_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.txt");
    fs::write(&out, "stale").expect("seed");

    let output = bin("swizzle-gen")
        .env_remove("RUST_LOG")
        .args(["2", "--check"])
        .arg(&out)
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("destination is stale"), "stderr: {stderr}");
}

#[test]
fn json_report_stays_clean_with_logging_enabled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("SwizzleInc");

    let output = bin("swizzle-gen-all")
        .env("RUST_LOG", "info")
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("replaced destination"), "stderr: {stderr}");
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["declaration_count"], 494);
}

#[cfg(unix)]
#[test]
fn gen_writes_through_symlinked_destination() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("real.txt");
    let link = dir.path().join("link.txt");
    fs::write(&target, "old").expect("seed");
    symlink(&target, &link).expect("symlink");

    bin("swizzle-gen").arg("1").arg(&link).assert().success();

    assert!(fs::symlink_metadata(&link)
        .expect("link metadata")
        .file_type()
        .is_symlink());
    let content = fs::read_to_string(&target).expect("read target");
    assert_eq!(content.split('\n').count(), 4);
}
