// SPDX-License-Identifier: Apache-2.0

use provlint_ingest::{
    assemble_from_sources, build_record, check_consistency, extract_job_ids, parse_document,
    EvidenceSource,
};
use provlint_model::Heuristics;
use serde_json::json;

fn source(rel_path: &str, bytes: &[u8]) -> EvidenceSource {
    EvidenceSource {
        rel_path: rel_path.to_string(),
        bytes: bytes.to_vec(),
        document: if rel_path.to_lowercase().ends_with(".json") {
            parse_document(bytes)
        } else {
            None
        },
    }
}

fn digest() -> String {
    "0".repeat(64)
}

#[test]
fn empty_structured_record_is_reported_in_all_four_missing_field_lists() {
    let sources = vec![source("empty.json", b"{}")];
    let h = Heuristics::default();
    let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);

    let record = &manifest.evidence_sets[0];
    assert!(record.backend.is_none());
    assert!(record.shots.is_none());
    assert!(record.timestamp.is_none());
    assert!(record.job_ids.is_empty());

    let report = check_consistency(&manifest, &sources, &h);
    for list in [
        &report.missing_backend,
        &report.missing_shots,
        &report.missing_timestamp,
        &report.missing_job_ids,
    ] {
        assert_eq!(list, &vec!["empty.json".to_string()]);
    }
}

#[test]
fn grouping_key_falls_back_to_file_stem() {
    let doc = json!({"backend": "ibm_fez"});
    let record = build_record(
        "results/bell_chsh.json",
        digest(),
        10,
        "deadbeef",
        Some(&doc),
        &Heuristics::default(),
    );
    assert_eq!(record.evidence_group_id, "bell_chsh");
}

#[test]
fn dashboard_identifier_absent_from_structured_evidence_is_the_mismatch_list() {
    let sources = vec![
        source(
            "dash.md",
            b"The IBM Quantum Dashboard lists job d0a1b2c3d4e5 as complete.",
        ),
        source("run.json", b"{}"),
    ];
    let h = Heuristics::default();
    let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
    let report = check_consistency(&manifest, &sources, &h);
    assert_eq!(
        report.unmatched_dashboard_job_ids,
        vec!["d0a1b2c3d4e5".to_string()]
    );
}

#[test]
fn structured_job_id_shares_the_final_acceptance_filter() {
    // too short for the text filter, and deliberately not exempt when
    // declared in a structured field either
    let doc = json!({"job_id": "X7"});
    assert!(extract_job_ids(&doc, &Heuristics::default()).is_empty());

    // passes prefix + length, so the declared field is honored lower-cased
    let doc = json!({"job_id": "D0A1B2C3D4E5"});
    assert_eq!(
        extract_job_ids(&doc, &Heuristics::default()),
        vec!["d0a1b2c3d4e5".to_string()]
    );
}

#[test]
fn shot_count_falls_back_into_nested_run_lists() {
    let doc = json!({"runs": [{"shots": 500}]});
    let record = build_record(
        "runs.json",
        digest(),
        10,
        "deadbeef",
        Some(&doc),
        &Heuristics::default(),
    );
    assert_eq!(record.shots, Some(500));
}

#[test]
fn malformed_bytes_still_produce_a_record_and_do_not_abort_assembly() {
    let sources = vec![
        source("broken.json", b"{definitely not json"),
        source("good.json", br#"{"shots": 8}"#),
    ];
    let h = Heuristics::default();
    let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
    assert_eq!(manifest.evidence_sets.len(), 2);

    let broken = &manifest.evidence_sets[0];
    assert_eq!(broken.file, "broken.json");
    assert_eq!(broken.evidence_group_id, "broken");
    assert_eq!(broken.size_bytes, 20);
    assert!(broken.backend.is_none());
    assert!(broken.shots.is_none());
    assert!(broken.timestamp.is_none());
    assert!(broken.job_ids.is_empty());

    assert_eq!(manifest.evidence_sets[1].shots, Some(8));
}

#[test]
fn no_sources_is_a_legitimate_empty_manifest() {
    let h = Heuristics::default();
    let manifest = assemble_from_sources(&[], "deadbeef", "t0", &h);
    assert!(manifest.evidence_sets.is_empty());
    manifest.validate_strict().expect("empty manifest valid");
    let report = check_consistency(&manifest, &[], &h);
    assert!(report.is_clean());
}
