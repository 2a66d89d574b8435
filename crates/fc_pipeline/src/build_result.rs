//! Build the canonical `Result` artifact.
//!
//! The id is derived from the canonical JSON bytes of the body *without*
//! the id field, then attached; re-hashing a result document minus its id
//! must always reproduce the id.

use crate::aggregate::AggregateResult;
use crate::PipelineError;
use fc_core::{Contest, Params};
use serde::Serialize;

/// The engine's result artifact: identity plus the full aggregate tables.
#[derive(Debug, Clone, Serialize)]
pub struct ResultDoc {
    /// "RES:<hex64>", derived from the canonical body.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tie policy token in force for this run.
    pub tie_policy: String,
    pub aggregate: AggregateResult,
}

/// Serialization shape used for id derivation (no id field).
#[derive(Serialize)]
struct ResultBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: &'a Option<String>,
    tie_policy: &'a str,
    aggregate: &'a AggregateResult,
}

pub fn build_result(
    contest: &Contest,
    params: &Params,
    aggregate: AggregateResult,
) -> Result<ResultDoc, PipelineError> {
    let tie_policy = params.tie_policy.as_token();
    let body = ResultBody {
        title: &contest.title,
        tie_policy,
        aggregate: &aggregate,
    };
    let id = fc_io::hasher::res_id_from_canonical(&body)?;
    Ok(ResultDoc {
        id,
        title: contest.title.clone(),
        tie_policy: tie_policy.to_string(),
        aggregate,
    })
}
