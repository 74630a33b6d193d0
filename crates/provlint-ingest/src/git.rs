// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process::Command;

/// Revision string recorded when no source-control metadata is available.
pub const UNKNOWN_REVISION: &str = "unknown";

/// Source-control revision lookup seam. The engine only ever consumes the
/// resolved opaque string.
pub trait Revision {
    fn head(&self, repo_root: &Path) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct GitRevision;

impl Revision for GitRevision {
    fn head(&self, repo_root: &Path) -> Option<String> {
        if !repo_root.join(".git").exists() {
            return None;
        }
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(repo_root)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Fixed revision for tests and deterministic replays.
#[derive(Debug, Clone)]
pub struct FixedRevision(pub String);

impl Revision for FixedRevision {
    fn head(&self, _repo_root: &Path) -> Option<String> {
        Some(self.0.clone())
    }
}

#[must_use]
pub fn resolve_revision(provider: &dyn Revision, repo_root: &Path) -> String {
    provider
        .head(repo_root)
        .unwrap_or_else(|| UNKNOWN_REVISION.to_string())
}
