#![forbid(unsafe_code)]

mod helpers;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use helpers::{emit_error, emit_events, emit_ok, load_heuristics, resolve_verbosity, OutputMode};
use provlint_core::{ExitCode, MachineError};
use provlint_ingest::{hash_file, run_check, run_scan_with_events, ScanOptions, TimestampPolicy};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

const PROVLINT_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "provlint")]
#[command(version)]
#[command(about = "Evidence manifest and provenance linter CLI")]
#[command(help_template = PROVLINT_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  PROVLINT_LOG_LEVEL   Log verbosity override\n  PROVLINT_HEURISTICS  Default heuristics overlay path"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an evidence directory and write manifest, checksums, reports
    Scan {
        #[arg(long, default_value = "docs/evidence")]
        evidence: PathBuf,
        #[arg(long, default_value = ".")]
        repo_root: PathBuf,
        #[arg(long, default_value_t = false)]
        write_index: bool,
        #[arg(long, default_value_t = false)]
        no_warnings: bool,
        #[arg(long)]
        heuristics: Option<PathBuf>,
        #[arg(long)]
        fixed_timestamp: Option<String>,
    },
    /// Compute the manifest and consistency report without writing files
    Check {
        #[arg(long, default_value = "docs/evidence")]
        evidence: PathBuf,
        #[arg(long, default_value = ".")]
        repo_root: PathBuf,
        #[arg(long)]
        heuristics: Option<PathBuf>,
    },
    /// Digest one file the way the manifest fingerprints evidence
    Hash {
        #[arg(long)]
        path: PathBuf,
    },
    /// Print the crate version
    Version,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

struct CliFailure {
    exit: ExitCode,
    error: MachineError,
}

fn usage(message: &str) -> CliFailure {
    CliFailure {
        exit: ExitCode::Usage,
        error: MachineError::new("usage_error", message),
    }
}

fn validation(code: &str, message: &str) -> CliFailure {
    CliFailure {
        exit: ExitCode::Validation,
        error: MachineError::new(code, message),
    }
}

fn internal(message: &str) -> CliFailure {
    CliFailure {
        exit: ExitCode::Internal,
        error: MachineError::new("internal_error", message),
    }
}

fn main() -> ProcessExitCode {
    let machine_json = std::env::args().any(|arg| arg == "--json");
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(&err, machine_json),
    };
    let mode = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
        verbose: resolve_verbosity(cli.verbose),
    };
    match run(cli.command, mode) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(failure) => {
            let exit = failure.exit;
            let error = failure.error.with_detail("exit_class", exit.as_str());
            emit_error(mode, &error);
            ProcessExitCode::from(exit as u8)
        }
    }
}

fn handle_parse_error(err: &clap::Error, machine_json: bool) -> ProcessExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{err}");
            ProcessExitCode::from(ExitCode::Success as u8)
        }
        _ => {
            if machine_json {
                let machine = MachineError::new("usage_error", &err.to_string());
                match serde_json::to_string(&machine) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("{machine}"),
                }
            } else {
                eprintln!("{err}");
            }
            ProcessExitCode::from(ExitCode::Usage as u8)
        }
    }
}

fn run(command: Option<Commands>, mode: OutputMode) -> Result<(), CliFailure> {
    let command = command.ok_or_else(|| usage("missing command; see --help"))?;
    match command {
        Commands::Scan {
            evidence,
            repo_root,
            write_index,
            no_warnings,
            heuristics,
            fixed_timestamp,
        } => {
            let heuristics =
                load_heuristics(heuristics).map_err(|e| validation("heuristics_error", &e))?;
            let options = ScanOptions {
                evidence_dir: evidence,
                repo_root,
                write_index,
                write_warnings: !no_warnings,
                heuristics,
                timestamp_policy: fixed_timestamp
                    .map_or(TimestampPolicy::WallClock, TimestampPolicy::Fixed),
            };
            let (outcome, events) =
                run_scan_with_events(&options).map_err(|e| validation("scan_error", &e.0))?;
            emit_events(mode, &events);
            emit_ok(
                mode,
                json!({
                    "command": "provlint scan",
                    "status": "ok",
                    "files": outcome.manifest.evidence_sets.len(),
                    "findings": outcome.report.finding_count(),
                    "manifest": outcome.outputs.manifest_path,
                    "checksums": outcome.outputs.checksums_path,
                    "index": outcome.outputs.index_path,
                    "warnings": outcome.outputs.warnings_path,
                }),
            )
            .map_err(|e| internal(&e))
        }
        Commands::Check {
            evidence,
            repo_root,
            heuristics,
        } => {
            let heuristics =
                load_heuristics(heuristics).map_err(|e| validation("heuristics_error", &e))?;
            let options = ScanOptions {
                evidence_dir: evidence,
                repo_root,
                heuristics,
                ..ScanOptions::default()
            };
            let (manifest, report) =
                run_check(&options).map_err(|e| validation("scan_error", &e.0))?;
            emit_ok(
                mode,
                json!({
                    "command": "provlint check",
                    "status": if report.is_clean() { "clean" } else { "findings" },
                    "files": manifest.evidence_sets.len(),
                    "report": report,
                }),
            )
            .map_err(|e| internal(&e))
        }
        Commands::Hash { path } => {
            let sha256 = hash_file(&path).map_err(|e| validation("io_error", &e.0))?;
            let size_bytes = fs::metadata(&path)
                .map(|m| m.len())
                .map_err(|e| {
                    validation("io_error", &format!("failed to stat {}: {e}", path.display()))
                })?;
            emit_ok(
                mode,
                json!({
                    "command": "provlint hash",
                    "path": path,
                    "sha256": sha256,
                    "size_bytes": size_bytes,
                }),
            )
            .map_err(|e| internal(&e))
        }
        Commands::Version => emit_ok(
            mode,
            json!({
                "name": "provlint",
                "version": env!("CARGO_PKG_VERSION"),
            }),
        )
        .map_err(|e| internal(&e)),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "provlint", &mut std::io::stdout());
            Ok(())
        }
    }
}
