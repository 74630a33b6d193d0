// SPDX-License-Identifier: Apache-2.0

use provlint_model::Heuristics;
use serde_json::Value;

use crate::walk::{walk, Node};

/// Non-throwing nested lookup. A missing key or a non-mapping on the way
/// down is absence, not an error.
pub fn deep_get<'a, S: AsRef<str>>(value: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(key.as_ref())?;
    }
    Some(current)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn positive_int(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().filter(|v| *v > 0),
        Value::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
            s.parse::<u64>().ok().filter(|v| *v > 0)
        }
        _ => None,
    }
}

/// Execution backend: first well-typed hit on the candidate paths, then a
/// leaf scan for the naming-convention prefix.
#[must_use]
pub fn extract_backend(document: &Value, heuristics: &Heuristics) -> Option<String> {
    for path in &heuristics.backend_paths {
        if let Some(s) = deep_get(document, path).and_then(non_empty_str) {
            return Some(s.to_string());
        }
    }

    for node in walk(document) {
        let text = match node {
            Node::Key(key) => key,
            Node::Scalar(Value::String(s)) => s.as_str(),
            Node::Scalar(_) => continue,
        };
        if text.starts_with(&heuristics.backend_prefix) {
            return Some(text.to_string());
        }
    }
    None
}

/// Shot count: a native positive integer or a decimal-digit string at each
/// candidate path; failing that, one level of recursion into the items of
/// a top-level sub-run list, reading each item's own `shots` integer.
#[must_use]
pub fn extract_shots(document: &Value, heuristics: &Heuristics) -> Option<u64> {
    for path in &heuristics.shots_paths {
        if let Some(n) = deep_get(document, path).and_then(positive_int) {
            return Some(n);
        }
    }

    let map = document.as_object()?;
    for key in &heuristics.run_list_keys {
        if let Some(Value::Array(items)) = map.get(key) {
            for item in items {
                if let Some(n) = item
                    .get("shots")
                    .and_then(Value::as_u64)
                    .filter(|v| *v > 0)
                {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Timestamp: any non-empty string at a candidate location, verbatim
/// (trimmed). Formats are heterogeneous across producers and deliberately
/// not parsed or validated.
#[must_use]
pub fn extract_timestamp(document: &Value, heuristics: &Heuristics) -> Option<String> {
    if let Some(map) = document.as_object() {
        for key in &heuristics.timestamp_keys {
            if let Some(s) = map.get(key).and_then(non_empty_str) {
                return Some(s.to_string());
            }
        }
    }

    for path in &heuristics.timestamp_paths {
        if let Some(s) = deep_get(document, path).and_then(non_empty_str) {
            return Some(s.to_string());
        }
    }
    None
}

/// Grouping key: an explicit declared value wins; otherwise the caller's
/// fallback (the file stem), so every record always has one.
#[must_use]
pub fn detect_group_id(document: &Value, heuristics: &Heuristics, fallback: &str) -> String {
    document
        .as_object()
        .and_then(|map| map.get(&heuristics.group_key))
        .and_then(non_empty_str)
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}
