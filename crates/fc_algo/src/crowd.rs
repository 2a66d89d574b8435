//! Crowd synthesis and consensus statistics.
//!
//! The "wisdom of the crowd" contestant is derived from the mean rank each
//! question received across the field: questions are ordered by ascending
//! mean and assigned ranks `1..=N` in that order, so the crowd's ranking is
//! a valid permutation by construction. Mean ties break by question
//! position (stable). All means share one denominator (the field size), so
//! ordering compares rank *sums* — no float in the construction path.
//!
//! Display statistics (mean/median tenths, mean absolute error hundredths)
//! are integer-scaled, rounded half up.

use alloc::vec::Vec;
use core::fmt;
use fc_core::{Contest, Contestant, ContestantId, Ranking};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrowdError {
    /// No contestants to take a mean over.
    EmptyField,
    /// A ranking does not span the question count; validation was skipped.
    LengthMismatch,
}

impl fmt::Display for CrowdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrowdError::EmptyField => write!(f, "cannot synthesize a crowd from no contestants"),
            CrowdError::LengthMismatch => write!(f, "ranking length does not match question count"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CrowdError {}

/// Per-question rank sums across the field (position-aligned).
pub fn rank_sums(contestants: &[Contestant], n: usize) -> Result<Vec<u64>, CrowdError> {
    if contestants.is_empty() {
        return Err(CrowdError::EmptyField);
    }
    let mut sums = alloc::vec![0u64; n];
    for c in contestants {
        if c.ranking.len() != n {
            return Err(CrowdError::LengthMismatch);
        }
        for (i, r) in c.ranking.iter().enumerate() {
            sums[i] += u64::from(r);
        }
    }
    Ok(sums)
}

/// The crowd's ranking: rank 1 to the lowest-mean question (the crowd bets
/// `No`), rank N to the highest (the crowd bets `Yes`).
pub fn crowd_ranking(contestants: &[Contestant], n: usize) -> Result<Ranking, CrowdError> {
    let sums = rank_sums(contestants, n)?;
    let mut order: Vec<usize> = (0..n).collect();
    // Stable sort: equal sums keep question order.
    order.sort_by_key(|&i| sums[i]);

    let mut ranks = alloc::vec![0u32; n];
    for (rank0, &q_idx) in order.iter().enumerate() {
        ranks[q_idx] = rank0 as u32 + 1;
    }
    Ok(Ranking::new(ranks))
}

/// Build the synthetic crowd contestant for a contest.
pub fn synthesize_crowd(contest: &Contest, id: ContestantId) -> Result<Contestant, CrowdError> {
    let ranking = crowd_ranking(&contest.contestants, contest.question_count())?;
    Ok(Contestant { id, ranking })
}

/// Mean rank in tenths, rounded half up (e.g. 125 → "12.5").
pub fn mean_rank_tenths(sum: u64, count: usize) -> u64 {
    let count = count as u64;
    (sum * 10 * 2 + count) / (2 * count)
}

/// Median rank in tenths for one question position.
pub fn median_rank_tenths(contestants: &[Contestant], position: usize) -> u64 {
    let mut ranks: Vec<u32> = contestants
        .iter()
        .map(|c| c.ranking.rank_at(position))
        .collect();
    ranks.sort_unstable();
    let n = ranks.len();
    if n % 2 == 1 {
        u64::from(ranks[n / 2]) * 10
    } else {
        // Mean of the two middle values; always a multiple of 5 in tenths.
        (u64::from(ranks[n / 2 - 1]) + u64::from(ranks[n / 2])) * 5
    }
}

/// Mean absolute rank difference against a reference ranking, in
/// hundredths, rounded half up. Measures how contrarian a ranking is
/// relative to the crowd.
pub fn mean_abs_error_hundredths(ranking: &Ranking, reference: &Ranking) -> Result<u64, CrowdError> {
    if ranking.len() != reference.len() || ranking.is_empty() {
        return Err(CrowdError::LengthMismatch);
    }
    let sum: u64 = ranking
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| u64::from(a.abs_diff(b)))
        .sum();
    let n = ranking.len() as u64;
    Ok((sum * 100 * 2 + n) / (2 * n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn contestant(id: &str, ranks: Vec<u32>) -> Contestant {
        Contestant {
            id: id.parse().unwrap(),
            ranking: Ranking::new(ranks),
        }
    }

    #[test]
    fn crowd_ranking_orders_by_mean() {
        let field = vec![contestant("a", vec![2, 1, 3]), contestant("b", vec![3, 1, 2])];
        let r = crowd_ranking(&field, 3).unwrap();
        // Sums per question: [5, 2, 5] → ascending positions [1, 0, 2]
        // (the position-0 question beats position 2 on the stable tie).
        assert_eq!(r.as_slice(), &[2, 1, 3]);
    }

    #[test]
    fn crowd_ranking_is_always_a_permutation() {
        let field = vec![
            contestant("a", vec![3, 1, 4, 2, 5]),
            contestant("b", vec![5, 4, 3, 2, 1]),
            contestant("c", vec![1, 2, 3, 4, 5]),
        ];
        let r = crowd_ranking(&field, 5).unwrap();
        assert!(r.is_permutation_of(5));
    }

    #[test]
    fn mean_ties_break_by_question_position() {
        // Both questions sum to 3: earlier position gets the lower rank.
        let field = vec![contestant("a", vec![1, 2]), contestant("b", vec![2, 1])];
        let r = crowd_ranking(&field, 2).unwrap();
        assert_eq!(r.as_slice(), &[1, 2]);
    }

    #[test]
    fn empty_field_cannot_be_synthesized() {
        assert_eq!(crowd_ranking(&[], 3), Err(CrowdError::EmptyField));
    }

    #[test]
    fn mean_tenths_round_half_up() {
        // 5/2 = 2.5 → 25 tenths; 7/3 = 2.333… → 23 tenths.
        assert_eq!(mean_rank_tenths(5, 2), 25);
        assert_eq!(mean_rank_tenths(7, 3), 23);
    }

    #[test]
    fn median_handles_even_and_odd_fields() {
        let odd = vec![
            contestant("a", vec![1]),
            contestant("b", vec![5]),
            contestant("c", vec![3]),
        ];
        assert_eq!(median_rank_tenths(&odd, 0), 30);
        let even = vec![contestant("a", vec![2]), contestant("b", vec![5])];
        assert_eq!(median_rank_tenths(&even, 0), 35);
    }

    #[test]
    fn mae_is_zero_against_self() {
        let r = Ranking::new(vec![3, 1, 2]);
        assert_eq!(mean_abs_error_hundredths(&r, &r).unwrap(), 0);
    }

    #[test]
    fn mae_scales_to_hundredths() {
        let a = Ranking::new(vec![1, 2, 3]);
        let b = Ranking::new(vec![3, 2, 1]);
        // |1-3| + |2-2| + |3-1| = 4; 4/3 = 1.333… → 133.
        assert_eq!(mean_abs_error_hundredths(&a, &b).unwrap(), 133);
    }
}
