//! fc_pipeline — deterministic pipeline surface for the forecast contest
//! engine (validate → guard → aggregate → build result → build run record).
//!
//! This crate stays clock-free and file-free: `fc_io` handles JSON, hashing
//! and atomic writes, `fc_algo` handles the math, and the CLI supplies
//! timestamps and engine metadata. Everything here is deterministic for a
//! given input.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod build_result;
pub mod build_run_record;
pub mod validate;

pub use aggregate::{aggregate as aggregate_contest, AggregateError, AggregateResult, NeedSplit, Standing};
pub use build_result::{build_result, ResultDoc};
pub use build_run_record::{build_run_record, RunRecordDoc};
pub use validate::{validate, ValidationReport};

use fc_core::{Contest, Params};
use serde::Serialize;
use std::fmt;

/// Engine identifiers (baked from compile-time env by the CLI).
#[derive(Debug, Clone, Serialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Top-level pipeline outputs.
#[derive(Debug)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub run_record: RunRecordDoc,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    /// Configuration errors: bad rankings, empty field, duplicates.
    Validate(String),
    /// Enumeration rejected up front (too many pending questions).
    Limit(String),
    /// Winner/aggregation failures.
    Aggregate(String),
    /// I/O-layer failures surfaced through fc_io.
    Io(String),
    /// Canonicalization/hash/id mismatches while building artifacts.
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Validate(m) => write!(f, "validation: {m}"),
            PipelineError::Limit(m) => write!(f, "limit: {m}"),
            PipelineError::Aggregate(m) => write!(f, "aggregate: {m}"),
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Build(m) => write!(f, "build: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<fc_io::IoError> for PipelineError {
    fn from(e: fc_io::IoError) -> Self {
        use fc_io::IoError::*;
        match e {
            Read(m) => PipelineError::Io(format!("read: {m}")),
            Write(m) => PipelineError::Io(format!("write: {m}")),
            Json { pointer, msg } => PipelineError::Io(format!("json {pointer}: {msg}")),
            Canon(m) => PipelineError::Build(format!("canon: {m}")),
            Hash(m) => PipelineError::Build(format!("hash: {m}")),
            Contest(m) => PipelineError::Validate(m),
        }
    }
}

impl From<AggregateError> for PipelineError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::Enumerate(inner) => PipelineError::Limit(inner.to_string()),
            AggregateError::Winner(inner) => PipelineError::Aggregate(inner.to_string()),
        }
    }
}

/// Reject over-budget enumerations before any work starts. The enumeration
/// size is known in advance (`2^pending`), so a caller that judges it too
/// large refuses the run rather than cancelling mid-flight.
pub fn check_enumeration_budget(contest: &Contest, max_pending: usize) -> Result<(), PipelineError> {
    let pending = contest.pending_count();
    if pending > max_pending {
        return Err(PipelineError::Limit(format!(
            "{pending} pending questions would enumerate 2^{pending} outcomes (cap: {max_pending}); \
             raise --max-pending to proceed"
        )));
    }
    Ok(())
}

/// Orchestrate one full run over an already-loaded contest.
///
/// `timestamp_utc` must match `YYYY-MM-DDTHH:MM:SSZ`; `contest_sha256` is
/// the input digest reported by the loader.
pub fn run_with_contest(
    contest: &Contest,
    params: &Params,
    engine: EngineMeta,
    timestamp_utc: &str,
    contest_sha256: &str,
) -> Result<PipelineOutputs, PipelineError> {
    let report = validate::validate(contest);
    if !report.pass {
        return Err(PipelineError::Validate(report.error_summary()));
    }

    log::info!(
        "aggregating 2^{} outcomes for {} contestants",
        contest.pending_count(),
        contest.contestants.len()
    );
    let agg = aggregate::aggregate(contest, params)?;
    log::debug!(
        "{} outcomes classified, {} required tie-breaking",
        agg.total_outcomes,
        agg.tie_outcomes
    );

    let result = build_result::build_result(contest, params, agg)?;
    let run_record =
        build_run_record::build_run_record(engine, timestamp_utc, contest_sha256, &result)?;

    Ok(PipelineOutputs { result, run_record })
}
