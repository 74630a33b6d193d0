// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn provlint() -> Command {
    Command::new(env!("CARGO_BIN_EXE_provlint"))
}

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("bell_run.json"),
        br#"{"backend": "ibm_fez", "shots": 4096, "timestamp": "2026-07-30T12:00:00Z", "job_id": "d0a1b2c3d4e5"}"#,
    )
    .expect("write bell_run");
    fs::write(
        dir.join("dashboard.md"),
        b"# Dashboard\n\nJob c0ffee00c0ffee is still only on the dashboard.\n",
    )
    .expect("write dashboard");
}

#[test]
fn scan_writes_manifest_checksums_and_reports() {
    let tmp = tempfile::tempdir().expect("tmp");
    write_fixture(tmp.path());

    provlint()
        .args(["--json", "scan", "--write-index"])
        .args(["--fixed-timestamp", "2026-08-01T00:00:00+00:00"])
        .arg("--evidence")
        .arg(tmp.path())
        .arg("--repo-root")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("manifest.json").exists());
    assert!(tmp.path().join("SHA256SUMS").exists());
    assert!(tmp.path().join("INDEX.md").exists());
    assert!(tmp.path().join("WARNINGS.md").exists());

    let manifest: Value = serde_json::from_slice(
        &fs::read(tmp.path().join("manifest.json")).expect("manifest bytes"),
    )
    .expect("manifest json");
    assert_eq!(manifest["schema_version"], Value::from(2));
    assert_eq!(manifest["git_commit"], Value::from("unknown"));
    assert_eq!(
        manifest["evidence_sets"][0]["file"],
        Value::from("bell_run.json")
    );

    let warnings = fs::read_to_string(tmp.path().join("WARNINGS.md")).expect("warnings");
    assert!(warnings.contains("c0ffee00c0ffee"));
}

#[test]
fn scan_twice_with_fixed_timestamp_is_byte_identical() {
    let tmp = tempfile::tempdir().expect("tmp");
    write_fixture(tmp.path());

    let run = || {
        provlint()
            .args(["--quiet", "scan"])
            .args(["--fixed-timestamp", "2026-08-01T00:00:00+00:00"])
            .arg("--evidence")
            .arg(tmp.path())
            .arg("--repo-root")
            .arg(tmp.path())
            .assert()
            .success();
        fs::read(tmp.path().join("manifest.json")).expect("manifest bytes")
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn check_reports_findings_without_writing_files() {
    let tmp = tempfile::tempdir().expect("tmp");
    write_fixture(tmp.path());

    let output = provlint()
        .args(["--json", "check"])
        .arg("--evidence")
        .arg(tmp.path())
        .arg("--repo-root")
        .arg(tmp.path())
        .output()
        .expect("run check");
    assert!(output.status.success());
    assert!(!tmp.path().join("manifest.json").exists());

    let payload: Value =
        serde_json::from_slice(&output.stdout).expect("check output json");
    assert_eq!(payload["status"], Value::from("findings"));
    assert_eq!(
        payload["report"]["unmatched_dashboard_job_ids"][0],
        Value::from("c0ffee00c0ffee")
    );
    // bell_run.json carries every expected field, so no missing-field lint
    let missing_shots = payload["report"]["missing_shots"]
        .as_array()
        .expect("missing_shots list");
    assert!(missing_shots.is_empty());
}

#[test]
fn hash_prints_the_content_digest() {
    let tmp = tempfile::tempdir().expect("tmp");
    let path = tmp.path().join("blob.json");
    fs::write(&path, b"{}").expect("write blob");

    let output = provlint()
        .args(["--json", "hash", "--path"])
        .arg(&path)
        .output()
        .expect("run hash");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).expect("hash output json");
    // sha256 of "{}"
    assert_eq!(
        payload["sha256"],
        Value::from("44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a")
    );
    assert_eq!(payload["size_bytes"], Value::from(2));
}

#[test]
fn custom_heuristics_extend_the_recognized_prefix_set() {
    let tmp = tempfile::tempdir().expect("tmp");
    fs::write(
        tmp.path().join("dash.md"),
        b"dashboard job zz00aabbccddeeff pending\n",
    )
    .expect("write dash");
    let config_dir = tempfile::tempdir().expect("tmp config");
    let overlay = config_dir.path().join("heuristics.json");
    fs::write(&overlay, br#"{"job_id_prefixes": ["d0", "c0", "zz"]}"#).expect("write overlay");

    let output = provlint()
        .args(["--json", "check"])
        .arg("--evidence")
        .arg(tmp.path())
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("--heuristics")
        .arg(&overlay)
        .output()
        .expect("run check");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).expect("check output json");
    assert_eq!(
        payload["report"]["unmatched_dashboard_job_ids"][0],
        Value::from("zz00aabbccddeeff")
    );
}
