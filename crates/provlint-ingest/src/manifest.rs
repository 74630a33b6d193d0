// SPDX-License-Identifier: Apache-2.0

use provlint_core::sha256_hex;
use provlint_model::{EvidenceManifest, EvidenceRecord, Heuristics};

use crate::record::build_record;
use crate::scan::EvidenceSource;

/// Aggregates records into one manifest. Input order is preserved as-is;
/// deterministic presentation order is the concern of whoever renders the
/// manifest, not of assembly.
#[must_use]
pub fn assemble_manifest(
    records: Vec<EvidenceRecord>,
    git_commit: String,
    generated_utc: String,
) -> EvidenceManifest {
    EvidenceManifest::new(generated_utc, git_commit, records)
}

/// The engine boundary: `(path, bytes, parsed document)` triples plus a
/// revision string and a generation timestamp in, one manifest out.
/// Assembling the same sources with the same revision and timestamp is
/// byte-identical under canonical serialization.
#[must_use]
pub fn assemble_from_sources(
    sources: &[EvidenceSource],
    git_commit: &str,
    generated_utc: &str,
    heuristics: &Heuristics,
) -> EvidenceManifest {
    let records = sources
        .iter()
        .map(|source| {
            build_record(
                &source.rel_path,
                sha256_hex(&source.bytes),
                source.bytes.len() as u64,
                git_commit,
                source.document.as_ref(),
                heuristics,
            )
        })
        .collect();
    assemble_manifest(records, git_commit.to_string(), generated_utc.to_string())
}
