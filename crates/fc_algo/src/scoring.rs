//! Scoring: the game's one rule.
//!
//! A contestant's score for an outcome vector is the sum of the ranks they
//! assigned to questions that resolved `Yes`. Ranks at `No` positions
//! contribute nothing — that is the contest rule, not an implementation
//! choice; never subtract for `No`.

use alloc::vec::Vec;
use fc_core::{Outcome, OutcomeVector, Question, Ranking};

/// Sum of ranks at `Yes` positions.
///
/// Precondition: `ranking.len() == vector.len()`. A mismatch means a
/// data-model invariant was broken upstream; it is fatal, not recoverable.
pub fn score(ranking: &Ranking, vector: &OutcomeVector) -> u32 {
    assert_eq!(
        ranking.len(),
        vector.len(),
        "ranking and outcome vector must be position-aligned"
    );
    ranking
        .iter()
        .zip(vector.iter())
        .filter(|(_, o)| *o == Outcome::Yes)
        .map(|(r, _)| r)
        .sum()
}

/// The ranks that counted toward [`score`] for this vector, unsorted.
/// This is the tie-break resolver's raw material.
pub fn contributing_ranks(ranking: &Ranking, vector: &OutcomeVector) -> Vec<u32> {
    assert_eq!(
        ranking.len(),
        vector.len(),
        "ranking and outcome vector must be position-aligned"
    );
    ranking
        .iter()
        .zip(vector.iter())
        .filter(|(_, o)| *o == Outcome::Yes)
        .map(|(r, _)| r)
        .collect()
}

/// Score already banked from questions resolved `Yes` so far.
pub fn banked_score(ranking: &Ranking, questions: &[Question]) -> u32 {
    assert_eq!(
        ranking.len(),
        questions.len(),
        "ranking and question sequence must be position-aligned"
    );
    ranking
        .iter()
        .zip(questions.iter())
        .filter(|(_, q)| q.resolution.as_outcome() == Some(Outcome::Yes))
        .map(|(r, _)| r)
        .sum()
}

/// Upper bound for any score: `1 + 2 + … + n`.
pub fn max_total_score(n: usize) -> u32 {
    let n = n as u32;
    n * (n + 1) / 2
}
