//! Tie-break resolution.
//!
//! Triggered only when two or more contestants share the maximum score for
//! one outcome vector. The default policy compares each tied contestant's
//! contributing ranks (exactly the ranks that produced the tied score),
//! sorted descending, level by level: the strictly largest value at the
//! first differing level wins. An exhausted list reads as 0 at that level.
//! Fully identical multisets fall back to lexicographic identifier order,
//! so exactly one winner is always produced — an unresolved tie never
//! escapes this module.

use crate::scoring;
use alloc::vec::Vec;
use fc_core::{Contestant, ContestantId, OutcomeVector, TiePolicy};

/// Pick the single winner among `tied`.
///
/// Precondition: `tied` is non-empty and every member shares the maximum
/// score for `vector`. The score equality is not re-checked here; the
/// winner resolver is the only caller and establishes it.
pub fn break_tie<'a>(
    tied: &[&'a Contestant],
    vector: &OutcomeVector,
    policy: TiePolicy,
) -> &'a ContestantId {
    assert!(!tied.is_empty(), "tie-break invoked with no contestants");
    if tied.len() == 1 {
        return &tied[0].id;
    }
    match policy {
        TiePolicy::IdentifierOrder => lowest_id(tied),
        TiePolicy::RankConcentration => rank_concentration(tied, vector),
    }
}

fn rank_concentration<'a>(tied: &[&'a Contestant], vector: &OutcomeVector) -> &'a ContestantId {
    // Descending contributing ranks per tied contestant.
    let mut ladders: Vec<Vec<u32>> = tied
        .iter()
        .map(|c| scoring::contributing_ranks(&c.ranking, vector))
        .collect();
    for ladder in &mut ladders {
        ladder.sort_unstable_by(|a, b| b.cmp(a));
    }

    let max_levels = ladders.iter().map(Vec::len).max().unwrap_or(0);
    let mut remaining: Vec<usize> = (0..tied.len()).collect();

    for level in 0..max_levels {
        let best = remaining
            .iter()
            .map(|&i| ladders[i].get(level).copied().unwrap_or(0))
            .max()
            .expect("remaining set never empties before a level completes");
        remaining.retain(|&i| ladders[i].get(level).copied().unwrap_or(0) == best);
        if remaining.len() == 1 {
            return &tied[remaining[0]].id;
        }
    }

    // Fully identical contributing-rank multisets.
    let survivors: Vec<&Contestant> = remaining.iter().map(|&i| tied[i]).collect();
    lowest_id(&survivors)
}

fn lowest_id<'a>(contestants: &[&'a Contestant]) -> &'a ContestantId {
    contestants
        .iter()
        .map(|c| &c.id)
        .min()
        .expect("non-empty by precondition")
}
