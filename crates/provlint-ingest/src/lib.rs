// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod consistency;
mod extract;
mod git;
mod hashing;
mod job;
mod jobid;
mod logging;
mod manifest;
mod record;
mod render;
mod scan;
mod walk;
mod write;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use provlint_model::{ConsistencyReport, EvidenceManifest};

pub const CRATE_NAME: &str = "provlint-ingest";

pub use consistency::check_consistency;
pub use extract::{deep_get, detect_group_id, extract_backend, extract_shots, extract_timestamp};
pub use git::{resolve_revision, FixedRevision, GitRevision, Revision, UNKNOWN_REVISION};
pub use hashing::hash_file;
pub use job::{ScanJob, ScanOptions, TimestampPolicy};
pub use jobid::{
    extract_job_ids, extract_job_ids_from_text, ACCEPT_MIN_LEN, TOKEN_MAX_LEN, TOKEN_MIN_LEN,
};
pub use logging::{ScanEvent, ScanLog, ScanStage};
pub use manifest::{assemble_from_sources, assemble_manifest};
pub use record::{build_record, file_stem, parse_document, SYNTHETIC_ROOT_KEY};
pub use render::{render_index, render_warnings};
pub use scan::{enumerate_sources, EvidenceSource, OUTPUT_BASENAMES};
pub use walk::{scalar_text, walk, Node};
pub use write::{render_checksums, write_scan_outputs, WrittenOutputs};

#[derive(Debug)]
pub struct ScanError(pub String);

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ScanError {}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub manifest: EvidenceManifest,
    pub report: ConsistencyReport,
    pub outputs: WrittenOutputs,
}

pub fn run_scan(options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    run_scan_with_events(options).map(|(outcome, _)| outcome)
}

/// Full pipeline: enumerate, fingerprint and extract, assemble, check,
/// persist. Returns the outcome together with the structured event log.
pub fn run_scan_with_events(
    options: &ScanOptions,
) -> Result<(ScanOutcome, Vec<ScanEvent>), ScanError> {
    options
        .heuristics
        .validate()
        .map_err(|e| ScanError(e.to_string()))?;
    let job = ScanJob::from_options(options);
    let mut log = ScanLog::default();

    let sources = enumerate_sources(&options.evidence_dir)?;
    log.emit(
        ScanStage::Enumerate,
        "sources",
        BTreeMap::from([("count".to_string(), sources.len().to_string())]),
    );

    let git_commit = resolve_revision(&GitRevision, &options.repo_root);
    let generated_utc = options.timestamp_policy.resolve();

    let manifest =
        assemble_from_sources(&sources, &git_commit, &generated_utc, &options.heuristics);
    log.emit(
        ScanStage::Extract,
        "records",
        BTreeMap::from([("count".to_string(), manifest.evidence_sets.len().to_string())]),
    );
    log.emit(
        ScanStage::Assemble,
        "manifest",
        BTreeMap::from([
            ("git_commit".to_string(), git_commit.clone()),
            (
                "schema_version".to_string(),
                manifest.schema_version.to_string(),
            ),
        ]),
    );

    let report = check_consistency(&manifest, &sources, &options.heuristics);
    log.emit(
        ScanStage::Check,
        "findings",
        BTreeMap::from([("count".to_string(), report.finding_count().to_string())]),
    );

    let outputs = write_scan_outputs(&job, &manifest, &report)?;
    log.emit(
        ScanStage::Persist,
        "outputs",
        BTreeMap::from([(
            "manifest".to_string(),
            outputs.manifest_path.display().to_string(),
        )]),
    );

    Ok((
        ScanOutcome {
            manifest,
            report,
            outputs,
        },
        log.into_events(),
    ))
}

/// Scan without persisting anything: the manifest and consistency report
/// computed in memory, for read-only checks.
pub fn run_check(
    options: &ScanOptions,
) -> Result<(EvidenceManifest, ConsistencyReport), ScanError> {
    options
        .heuristics
        .validate()
        .map_err(|e| ScanError(e.to_string()))?;
    let sources = enumerate_sources(&options.evidence_dir)?;
    let git_commit = resolve_revision(&GitRevision, &options.repo_root);
    let generated_utc = options.timestamp_policy.resolve();
    let manifest =
        assemble_from_sources(&sources, &git_commit, &generated_utc, &options.heuristics);
    let report = check_consistency(&manifest, &sources, &options.heuristics);
    Ok((manifest, report))
}
