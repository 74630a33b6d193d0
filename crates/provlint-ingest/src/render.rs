// SPDX-License-Identifier: Apache-2.0

use provlint_core::canonical::stable_sort_by_key;
use provlint_model::{ConsistencyReport, EvidenceManifest, EvidenceRecord};

fn sorted_records(manifest: &EvidenceManifest) -> Vec<&EvidenceRecord> {
    stable_sort_by_key(manifest.evidence_sets.iter().collect(), |r| r.file.clone())
}

/// Human-readable index of the manifest, one section per file, sorted by
/// path for reproducible output.
#[must_use]
pub fn render_index(manifest: &EvidenceManifest) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Evidence Index".to_string());
    lines.push(String::new());
    lines.push(format!("- Generated: {}", manifest.generated_utc));
    lines.push(format!("- Git commit: `{}`", manifest.git_commit));
    lines.push(String::new());
    lines.push("## Files".to_string());
    lines.push(String::new());
    for record in sorted_records(manifest) {
        lines.push(format!("### {}", record.file));
        lines.push(format!("- SHA256: `{}`", record.sha256));
        lines.push(format!("- Size: {} bytes", record.size_bytes));
        if let Some(backend) = &record.backend {
            lines.push(format!("- Backend: `{backend}`"));
        }
        if let Some(shots) = record.shots {
            lines.push(format!("- Shots: `{shots}`"));
        }
        if let Some(timestamp) = &record.timestamp {
            lines.push(format!("- Timestamp: `{timestamp}`"));
        }
        if !record.job_ids.is_empty() {
            lines.push(format!("- Job IDs ({}):", record.job_ids.len()));
            for id in &record.job_ids {
                lines.push(format!("  - `{id}`"));
            }
        }
        lines.push(format!("- evidence_group_id: `{}`", record.evidence_group_id));
        lines.push(String::new());
    }
    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("## {title}"));
    for item in items {
        lines.push(format!("- {item}"));
    }
    lines.push(String::new());
}

/// Consistency findings as a markdown report for human review.
#[must_use]
pub fn render_warnings(manifest: &EvidenceManifest, report: &ConsistencyReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Evidence Warnings / Consistency Report".to_string());
    lines.push(String::new());
    lines.push(format!("- Generated: {}", manifest.generated_utc));
    lines.push(format!("- Git commit: `{}`", manifest.git_commit));
    lines.push(String::new());

    if !report.unmatched_dashboard_job_ids.is_empty() {
        lines.push("## Dashboard job IDs not found in JSON evidence".to_string());
        lines.push(
            "These job IDs appear in dashboard markdown(s) but were not found in any JSON evidence file:"
                .to_string(),
        );
        lines.push(String::new());
        for id in &report.unmatched_dashboard_job_ids {
            lines.push(format!("- `{id}`"));
        }
        lines.push(String::new());
        lines.push(
            "Recommendation: add `evidence_group_id` and ensure the dashboard MD references the same group + job_id as the JSON artifact."
                .to_string(),
        );
        lines.push(String::new());
    }

    push_section(
        &mut lines,
        "JSON evidence missing `backend` field",
        &report.missing_backend,
    );
    push_section(
        &mut lines,
        "JSON evidence missing `shots` field",
        &report.missing_shots,
    );
    push_section(
        &mut lines,
        "JSON evidence missing `timestamp` field",
        &report.missing_timestamp,
    );
    push_section(
        &mut lines,
        "JSON evidence missing `job_ids` field",
        &report.missing_job_ids,
    );

    if report.is_clean() {
        lines.push("No issues detected by current heuristics.".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}
