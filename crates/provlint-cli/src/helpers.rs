use provlint_core::{MachineError, ENV_PROVLINT_HEURISTICS, ENV_PROVLINT_LOG_LEVEL};
use provlint_ingest::ScanEvent;
use provlint_model::Heuristics;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub(crate) struct OutputMode {
    pub json: bool,
    pub quiet: bool,
    pub verbose: u8,
}

/// `--verbose` wins; otherwise `PROVLINT_LOG_LEVEL=debug|trace` turns the
/// structured event stream on.
pub(crate) fn resolve_verbosity(flag_count: u8) -> u8 {
    if flag_count > 0 {
        return flag_count;
    }
    match std::env::var(ENV_PROVLINT_LOG_LEVEL).ok().as_deref() {
        Some("debug" | "trace") => 1,
        _ => 0,
    }
}

pub(crate) fn emit_ok(mode: OutputMode, payload: Value) -> Result<(), String> {
    if mode.quiet {
        return Ok(());
    }
    if mode.json {
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

pub(crate) fn emit_events(mode: OutputMode, events: &[ScanEvent]) {
    if mode.quiet || mode.verbose == 0 {
        return;
    }
    for event in events {
        if let Ok(text) = serde_json::to_string(event) {
            eprintln!("{text}");
        }
    }
}

pub(crate) fn emit_error(mode: OutputMode, error: &MachineError) {
    if mode.json {
        match serde_json::to_string(error) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{error}"),
        }
    } else {
        eprintln!("{error}");
    }
}

/// Heuristics overlay resolution: the explicit flag wins, then the
/// `PROVLINT_HEURISTICS` environment variable, then built-in defaults.
pub(crate) fn load_heuristics(explicit: Option<PathBuf>) -> Result<Heuristics, String> {
    let path = explicit.or_else(|| {
        std::env::var(ENV_PROVLINT_HEURISTICS)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });
    let Some(path) = path else {
        return Ok(Heuristics::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| format!("failed to read heuristics {}: {e}", path.display()))?;
    let heuristics: Heuristics =
        serde_json::from_str(&raw).map_err(|e| format!("invalid heuristics JSON: {e}"))?;
    heuristics.validate().map_err(|e| e.to_string())?;
    Ok(heuristics)
}
