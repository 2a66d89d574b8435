//! Build the `RunRecord` artifact: who ran what, on which input, producing
//! which outputs. Timestamps arrive as data — this crate never reads a
//! clock.

use crate::build_result::ResultDoc;
use crate::{EngineMeta, PipelineError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunInputs {
    /// SHA-256 of the contest document's canonical bytes.
    pub contest_sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TiePolicyEcho {
    pub tie_policy: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutputs {
    pub result_id: String,
    pub result_sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunRecordDoc {
    /// "RUN:<ts>-<hex16>", derived from the canonical body.
    pub id: String,
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    pub inputs: RunInputs,
    pub policy: TiePolicyEcho,
    pub outputs: RunOutputs,
}

/// Serialization shape used for id derivation (no id field).
#[derive(Serialize)]
struct RunBody<'a> {
    timestamp_utc: &'a str,
    engine: &'a EngineMeta,
    inputs: &'a RunInputs,
    policy: &'a TiePolicyEcho,
    outputs: &'a RunOutputs,
}

pub fn build_run_record(
    engine: EngineMeta,
    timestamp_utc: &str,
    contest_sha256: &str,
    result: &ResultDoc,
) -> Result<RunRecordDoc, PipelineError> {
    contest_sha256
        .parse::<fc_core::ids::Sha256>()
        .map_err(|_| PipelineError::Build(format!("invalid contest digest: {contest_sha256:?}")))?;
    let inputs = RunInputs {
        contest_sha256: contest_sha256.to_string(),
    };
    let policy = TiePolicyEcho {
        tie_policy: result.tie_policy.clone(),
    };
    let outputs = RunOutputs {
        result_id: result.id.clone(),
        result_sha256: fc_io::hasher::sha256_canonical(result)?,
    };
    let body = RunBody {
        timestamp_utc,
        engine: &engine,
        inputs: &inputs,
        policy: &policy,
        outputs: &outputs,
    };
    let id = fc_io::hasher::run_id_from_canonical(timestamp_utc, &body)?;
    Ok(RunRecordDoc {
        id,
        timestamp_utc: timestamp_utc.to_string(),
        engine,
        inputs,
        policy,
        outputs,
    })
}
