// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use provlint_model::{output_paths, Heuristics, OutputPaths};

/// Generation-timestamp source. The deterministic core never reads the
/// wall clock; tests and replays pin the stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampPolicy {
    WallClock,
    Fixed(String),
}

impl TimestampPolicy {
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::WallClock => chrono::Utc::now().to_rfc3339(),
            Self::Fixed(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub evidence_dir: PathBuf,
    pub repo_root: PathBuf,
    pub write_index: bool,
    pub write_warnings: bool,
    pub heuristics: Heuristics,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            evidence_dir: PathBuf::from("docs/evidence"),
            repo_root: PathBuf::from("."),
            write_index: false,
            write_warnings: true,
            heuristics: Heuristics::default(),
            timestamp_policy: TimestampPolicy::WallClock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanJob {
    pub options: ScanOptions,
    pub output_layout: OutputPaths,
}

impl ScanJob {
    #[must_use]
    pub fn from_options(options: &ScanOptions) -> Self {
        Self {
            output_layout: output_paths(&options.evidence_dir),
            options: options.clone(),
        }
    }
}
