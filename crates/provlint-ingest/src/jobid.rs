// SPDX-License-Identifier: Apache-2.0

use provlint_model::Heuristics;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::extract::deep_get;
use crate::walk::scalar_text;

/// Token shape: a maximal run of alphanumeric characters in this range.
pub const TOKEN_MIN_LEN: usize = 10;
pub const TOKEN_MAX_LEN: usize = 40;
/// Acceptance requires this stricter minimum on top of the token shape.
pub const ACCEPT_MIN_LEN: usize = 12;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[A-Za-z0-9]+").expect("static token pattern"))
}

/// The one acceptance filter shared by the structured pass and the text
/// scan, so the two paths can never disagree: case-folded, entirely
/// alphanumeric, length 12..=40, and starting with a configured prefix.
/// Structured-field values are not exempt; a declared job id failing the
/// filter is silently dropped.
fn accepted(folded: &str, prefixes: &[String]) -> bool {
    folded.len() >= ACCEPT_MIN_LEN
        && folded.len() <= TOKEN_MAX_LEN
        && folded.chars().all(|c| c.is_ascii_alphanumeric())
        && prefixes.iter().any(|p| folded.starts_with(p.as_str()))
}

/// Membership hash set plus append-only order, so output preserves first
/// occurrence.
#[derive(Debug, Default)]
struct OrderedIdSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedIdSet {
    fn insert(&mut self, id: String) {
        if self.seen.insert(id.clone()) {
            self.items.push(id);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Scans free text for job identifiers: maximal alphanumeric runs of
/// token shape, case-folded, passed through the shared acceptance filter,
/// de-duplicated in first-occurrence order.
#[must_use]
pub fn extract_job_ids_from_text(text: &str, heuristics: &Heuristics) -> Vec<String> {
    let prefixes = heuristics.folded_prefixes();
    let mut out = OrderedIdSet::default();
    for m in token_pattern().find_iter(text) {
        let token = m.as_str();
        if token.len() < TOKEN_MIN_LEN || token.len() > TOKEN_MAX_LEN {
            continue;
        }
        let folded = token.to_lowercase();
        if accepted(&folded, &prefixes) {
            out.insert(folded);
        }
    }
    out.into_vec()
}

/// Extracts every job identifier from a document. Structured fields are
/// consulted first (direct keys, list keys, nested paths, collected
/// regardless of the filter at this stage), then the whole document's
/// scalar text is scanned as a fallback for identifiers embedded in
/// prose, logs, or URLs. All candidates are normalized through the shared
/// acceptance filter in encounter order.
#[must_use]
pub fn extract_job_ids(document: &Value, heuristics: &Heuristics) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(map) = document.as_object() {
        for key in &heuristics.job_id_keys {
            if let Some(Value::String(s)) = map.get(key) {
                candidates.push(s.clone());
            }
        }
        for key in &heuristics.job_id_list_keys {
            if let Some(Value::Array(items)) = map.get(key) {
                candidates.extend(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(ToString::to_string),
                );
            }
        }
    }

    for path in &heuristics.job_id_paths {
        if let Some(Value::String(s)) = deep_get(document, path) {
            candidates.push(s.clone());
        }
    }

    let text = scalar_text(document);
    candidates.extend(extract_job_ids_from_text(&text, heuristics));

    let prefixes = heuristics.folded_prefixes();
    let mut out = OrderedIdSet::default();
    for candidate in candidates {
        let folded = candidate.trim().to_lowercase();
        if folded.is_empty() {
            continue;
        }
        if accepted(&folded, &prefixes) {
            out.insert(folded);
        }
    }
    out.into_vec()
}
