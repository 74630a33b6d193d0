// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use provlint_core::sha256_hex;

use crate::ScanError;

/// Content digest of the exact file bytes. Stable across repeated runs on
/// unchanged bytes; the algorithm choice is a collaborator contract.
pub fn hash_file(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path)
        .map_err(|e| ScanError(format!("failed to read {}: {e}", path.display())))?;
    Ok(sha256_hex(&bytes))
}
