//! Winner resolution for one outcome vector.
//!
//! Scores every contestant, finds the maximum, and classifies the vector:
//! a single top scorer wins outright; several invoke the tie-break
//! resolver. The full top-scorer set is retained because downstream
//! aggregation needs it for tie-only bookkeeping.

use crate::{scoring, tie_break};
use alloc::vec::Vec;
use core::fmt;
use fc_core::{Contestant, ContestantId, OutcomeVector, Params};

/// Classification of one outcome vector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinResult {
    /// The single recorded winner (after tie-break if needed).
    pub winner: ContestantId,
    /// True iff more than one contestant reached the maximum score.
    pub was_tie: bool,
    /// Every contestant that reached the maximum score, in field order.
    /// Contains exactly the winner when `was_tie` is false.
    pub top_scorers: Vec<ContestantId>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WinnerError {
    /// An empty contestant set is a fatal configuration error.
    EmptyField,
}

impl fmt::Display for WinnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinnerError::EmptyField => write!(f, "cannot resolve a winner with no contestants"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WinnerError {}

/// Resolve the winner of `vector` across `contestants`.
pub fn resolve(
    vector: &OutcomeVector,
    contestants: &[Contestant],
    params: &Params,
) -> Result<WinResult, WinnerError> {
    if contestants.is_empty() {
        return Err(WinnerError::EmptyField);
    }

    let scores: Vec<u32> = contestants
        .iter()
        .map(|c| scoring::score(&c.ranking, vector))
        .collect();
    let max = *scores.iter().max().expect("non-empty by check above");

    let top: Vec<&Contestant> = contestants
        .iter()
        .zip(scores.iter())
        .filter(|(_, s)| **s == max)
        .map(|(c, _)| c)
        .collect();

    let was_tie = top.len() > 1;
    let winner = if was_tie {
        tie_break::break_tie(&top, vector, params.tie_policy).clone()
    } else {
        top[0].id.clone()
    };

    Ok(WinResult {
        winner,
        was_tie,
        top_scorers: top.iter().map(|c| c.id.clone()).collect(),
    })
}
