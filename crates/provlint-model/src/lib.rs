#![forbid(unsafe_code)]
//! Provlint model SSOT.
//!
//! Serialized field names in this crate are the external contract of the
//! evidence manifest; optional record fields serialize only when present.

mod heuristics;
mod manifest;
mod record;
mod report;

pub use heuristics::Heuristics;
pub use manifest::{output_paths, EvidenceManifest, OutputPaths, SCHEMA_VERSION};
pub use record::{
    is_narrative_path, is_structured_path, path_has_extension, EvidenceRecord, ValidationError,
    NARRATIVE_EXTENSION, SHA256_HEX_LEN, STRUCTURED_EXTENSION,
};
pub use report::ConsistencyReport;

pub const CRATE_NAME: &str = "provlint-model";
