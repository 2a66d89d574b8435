//! fc — offline, deterministic forecast contest evaluator.
//!
//! Wiring: exit-code table, typed error mapping, logging init, the
//! validate-only short-circuit, and the full run path (load → crowd →
//! validate → guard → pipeline → artifacts → rendering).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const LIMIT: i32 = 5;
}

use std::fs;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use fc_core::{Params, TiePolicy};
use fc_pipeline::{EngineMeta, PipelineError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Document shape, identifier, or configuration failures.
    Validation(String),
    /// Filesystem failures (read/write).
    Io(String),
    /// Enumeration budget refusals.
    Limit(String),
    /// Report building/rendering failures.
    Render(String),
    /// Canonicalization/hash failures and anything else.
    Other(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m)
            | MainError::Io(m)
            | MainError::Limit(m)
            | MainError::Render(m)
            | MainError::Other(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("fc: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_logging(args.quiet);

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("fc: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Limit(_) => LIMIT,
        MainError::Render(_) => IO,
        MainError::Other(_) => IO,
    }
}

fn map_io_err(e: fc_io::IoError) -> MainError {
    use fc_io::IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Contest(m) => MainError::Validation(m),
        Read(m) => MainError::Io(format!("read: {m}")),
        Write(m) => MainError::Io(format!("write: {m}")),
        Canon(m) => MainError::Other(format!("canon: {m}")),
        Hash(m) => MainError::Other(format!("hash: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Limit(m) => MainError::Limit(m),
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Aggregate(m) | PipelineError::Build(m) => MainError::Other(m),
    }
}

fn run_once(args: &Args) -> Result<(), MainError> {
    // 1) Load & type the contest document.
    let loaded = fc_io::loader::load_contest_path(&args.contest).map_err(map_io_err)?;
    let mut contest = loaded.contest;

    // 2) Optional crowd contestant, synthesized before validation so the
    //    permutation check covers it too.
    if args.with_crowd {
        let id = args
            .crowd_id
            .parse()
            .expect("crowd id validated during arg parsing");
        let crowd = fc_algo::crowd::synthesize_crowd(&contest, id)
            .map_err(|e| MainError::Validation(e.to_string()))?;
        log::info!("added crowd contestant {}", crowd.id);
        contest.contestants.push(crowd);
    }

    // 3) Structural validation (all findings, deterministic order).
    let report = fc_pipeline::validate::validate(&contest);
    for issue in &report.issues {
        match issue.severity {
            fc_pipeline::validate::Severity::Warning => log::warn!("{}", issue.message),
            fc_pipeline::validate::Severity::Error => log::error!("{}", issue.message),
        }
    }
    if !report.pass {
        return Err(MainError::Validation(report.error_summary()));
    }
    if args.validate_only {
        if !args.quiet {
            eprintln!("validate-only: inputs OK");
        }
        return Ok(());
    }

    // 4) Pre-flight enumeration guard (reject, never cancel mid-run).
    fc_pipeline::check_enumeration_budget(&contest, args.max_pending).map_err(map_pipeline_err)?;

    // 5) Run the engine.
    let params = Params {
        tie_policy: if args.identifier_ties {
            TiePolicy::IdentifierOrder
        } else {
            TiePolicy::RankConcentration
        },
    };
    let engine = EngineMeta {
        vendor: option_env!("FC_ENGINE_VENDOR").unwrap_or("fc").to_string(),
        name: option_env!("FC_ENGINE_NAME")
            .unwrap_or(env!("CARGO_PKG_NAME"))
            .to_string(),
        version: option_env!("FC_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("FC_ENGINE_BUILD").unwrap_or("dev").to_string(),
    };
    let timestamp_utc = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let outputs = fc_pipeline::run_with_contest(
        &contest,
        &params,
        engine,
        &timestamp_utc,
        &loaded.contest_sha256,
    )
    .map_err(map_pipeline_err)?;

    // 6) Canonical artifacts.
    fc_io::canonical_json::write_canonical_file(&args.out.join("result.json"), &outputs.result)
        .map_err(map_io_err)?;
    fc_io::canonical_json::write_canonical_file(
        &args.out.join("run_record.json"),
        &outputs.run_record,
    )
    .map_err(map_io_err)?;

    // 7) Report model + renderers.
    let model = fc_report::build_model(&contest, &outputs.result, &outputs.run_record)
        .map_err(|e| MainError::Render(e.to_string()))?;

    for renderer in &args.render {
        match renderer.as_str() {
            "json" => {
                let body = fc_report::render_json::render_json_pretty(&model)
                    .map_err(|e| MainError::Render(e.to_string()))?;
                write_report(&args.out.join("report.json"), &body)?;
            }
            "text" => {
                let body = fc_report::render_text::render_text(&model)
                    .map_err(|e| MainError::Render(e.to_string()))?;
                write_report(&args.out.join("report.txt"), &body)?;
            }
            "html" => {
                #[cfg(feature = "render-html")]
                {
                    let body = fc_report::render_html::render_html(&model)
                        .map_err(|e| MainError::Render(e.to_string()))?;
                    write_report(&args.out.join("report.html"), &body)?;
                }
                #[cfg(not(feature = "render-html"))]
                unreachable!("html render rejected during arg parsing");
            }
            other => unreachable!("clap value_parser admits no renderer {other:?}"),
        }
    }

    if !args.quiet {
        let text = fc_report::render_text::render_text(&model)
            .map_err(|e| MainError::Render(e.to_string()))?;
        print!("{text}");
    }

    Ok(())
}

fn write_report(path: &std::path::Path, body: &str) -> Result<(), MainError> {
    fs::write(path, body).map_err(|e| MainError::Io(format!("write: {}: {e}", path.display())))
}
