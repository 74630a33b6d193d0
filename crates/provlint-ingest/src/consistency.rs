// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use provlint_model::{ConsistencyReport, EvidenceManifest, Heuristics};

use crate::jobid::extract_job_ids_from_text;
use crate::scan::EvidenceSource;

/// Cross-references narrative documents against structured evidence and
/// lints structured records for missing provenance fields.
///
/// The mismatch check is a set difference: a narrative identifier
/// matching any one structured record anywhere in the manifest clears the
/// flag. Findings are informational only; the manifest is never mutated
/// and the run never fails on findings.
#[must_use]
pub fn check_consistency(
    manifest: &EvidenceManifest,
    sources: &[EvidenceSource],
    heuristics: &Heuristics,
) -> ConsistencyReport {
    let marker = heuristics.narrative_marker.to_lowercase();

    let mut structured_ids: BTreeSet<String> = BTreeSet::new();
    for record in &manifest.evidence_sets {
        if record.is_structured() {
            structured_ids.extend(record.job_ids.iter().map(|id| id.to_lowercase()));
        }
    }

    let mut dashboard_ids: BTreeSet<String> = BTreeSet::new();
    for source in sources {
        if !source.is_narrative() {
            continue;
        }
        let text = String::from_utf8_lossy(&source.bytes);
        if !text.to_lowercase().contains(&marker) {
            continue;
        }
        dashboard_ids.extend(extract_job_ids_from_text(&text, heuristics));
    }

    let mut report = ConsistencyReport::default();
    report.unmatched_dashboard_job_ids = dashboard_ids
        .difference(&structured_ids)
        .cloned()
        .collect();

    for record in &manifest.evidence_sets {
        if !record.is_structured() {
            continue;
        }
        if record.backend.is_none() {
            report.missing_backend.push(record.file.clone());
        }
        if record.shots.is_none() {
            report.missing_shots.push(record.file.clone());
        }
        if record.timestamp.is_none() {
            report.missing_timestamp.push(record.file.clone());
        }
        if record.job_ids.is_empty() {
            report.missing_job_ids.push(record.file.clone());
        }
    }
    report.missing_backend.sort();
    report.missing_shots.sort();
    report.missing_timestamp.sort();
    report.missing_job_ids.sort();
    report
}

#[cfg(test)]
mod tests {
    use super::check_consistency;
    use crate::manifest::assemble_from_sources;
    use crate::record::parse_document;
    use crate::scan::EvidenceSource;
    use provlint_model::Heuristics;

    fn source(rel_path: &str, bytes: &[u8]) -> EvidenceSource {
        EvidenceSource {
            rel_path: rel_path.to_string(),
            bytes: bytes.to_vec(),
            document: if rel_path.ends_with(".json") {
                parse_document(bytes)
            } else {
                None
            },
        }
    }

    #[test]
    fn dashboard_id_missing_from_structured_evidence_is_flagged() {
        let sources = vec![
            source("dash.md", b"IBM Quantum Dashboard shows job d0a1b2c3d4e5"),
            source("run.json", b"{}"),
        ];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert_eq!(report.unmatched_dashboard_job_ids, vec!["d0a1b2c3d4e5"]);
    }

    #[test]
    fn any_structured_record_clears_a_dashboard_id() {
        let sources = vec![
            source("dash.md", b"dashboard: d0a1b2c3d4e5"),
            source("empty.json", b"{}"),
            source("run.json", br#"{"job_id": "D0A1B2C3D4E5"}"#),
        ];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert!(report.unmatched_dashboard_job_ids.is_empty());
    }

    #[test]
    fn markdown_without_marker_word_is_not_a_dashboard() {
        let sources = vec![source("notes.md", b"plain notes about d0a1b2c3d4e5")];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert!(report.unmatched_dashboard_job_ids.is_empty());
    }

    #[test]
    fn marker_word_matches_case_insensitively() {
        let sources = vec![source("dash.md", b"DASHBOARD link: d0a1b2c3d4e5")];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert_eq!(report.unmatched_dashboard_job_ids, vec!["d0a1b2c3d4e5"]);
    }

    #[test]
    fn empty_structured_record_lands_in_all_four_missing_lists() {
        let sources = vec![source("bare.json", b"{}")];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert_eq!(report.missing_backend, vec!["bare.json"]);
        assert_eq!(report.missing_shots, vec!["bare.json"]);
        assert_eq!(report.missing_timestamp, vec!["bare.json"]);
        assert_eq!(report.missing_job_ids, vec!["bare.json"]);
    }

    #[test]
    fn narrative_records_are_not_linted_for_missing_fields() {
        let sources = vec![source("dash.md", b"dashboard only")];
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&sources, "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &sources, &h);
        assert!(report.missing_backend.is_empty());
        assert!(report.missing_job_ids.is_empty());
    }

    #[test]
    fn empty_manifest_yields_clean_report() {
        let h = Heuristics::default();
        let manifest = assemble_from_sources(&[], "deadbeef", "t0", &h);
        let report = check_consistency(&manifest, &[], &h);
        assert!(report.is_clean());
    }
}
