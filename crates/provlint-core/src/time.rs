/// Determinism policy marker.
///
/// Canonicalization, hashing, and extraction logic must not depend on
/// wall-clock time; generation timestamps are supplied by the caller.
#[must_use]
pub const fn determinism_time_policy() -> &'static str {
    "No wall-clock time allowed in deterministic core paths"
}
