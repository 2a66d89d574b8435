//! Contest model: questions, rankings, contestants.
//!
//! The ordered question sequence defines the fixed-width outcome vector's
//! positions. That ordering must be identical everywhere it is used
//! (ranking indices, outcome vectors, aggregation keys) — the engine's
//! central invariant. Nothing here is mutated after validation.

use crate::errors::CoreError;
use crate::outcome::Resolution;
use crate::tokens::{ContestantId, QuestionId};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One yes/no question with its current resolution state.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Question {
    pub id: QuestionId,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub text: Option<String>,
    pub resolution: Resolution,
}

/// A contestant's strict ranking: one rank per question position,
/// expected to be exactly a permutation of `1..=N`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ranking(Vec<u32>);

impl Ranking {
    pub fn new(ranks: Vec<u32>) -> Self {
        Self(ranks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rank assigned to question position `i`.
    pub fn rank_at(&self, i: usize) -> u32 {
        self.0[i]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// True iff the multiset of values equals `{1, ..., n}`.
    ///
    /// Checked with a seen-bitmap rather than sorting; `n` is small but the
    /// check runs once per contestant at load time and must be exact.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = alloc::vec![false; n];
        for r in self.iter() {
            let r = r as usize;
            if r == 0 || r > n || seen[r - 1] {
                return false;
            }
            seen[r - 1] = true;
        }
        true
    }
}

/// A contestant and their submitted ranking.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contestant {
    pub id: ContestantId,
    pub ranking: Ranking,
}

/// The full read-only contest: questions plus contestant field.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contest {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    pub questions: Vec<Question>,
    pub contestants: Vec<Contestant>,
}

impl Contest {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Positions of still-pending questions, ascending.
    pub fn pending_positions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.resolution.is_pending())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.resolution.is_pending())
            .count()
    }

    /// Number of questions already resolved `Yes` (the delta-bucket baseline).
    pub fn known_yes_count(&self) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.resolution == Resolution::Yes)
            .count() as u32
    }

    /// Pending question ids in question order.
    pub fn pending_ids(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .filter(|q| q.resolution.is_pending())
            .map(|q| q.id.clone())
            .collect()
    }

    /// Fast structural check: every ranking is a permutation of `1..=N` and
    /// the field is non-empty. Returns the first violation; the pipeline's
    /// validation stage reports all of them.
    pub fn check_rankings(&self) -> Result<(), CoreError> {
        if self.questions.is_empty() {
            return Err(CoreError::NoQuestions);
        }
        if self.contestants.is_empty() {
            return Err(CoreError::EmptyField);
        }
        let n = self.question_count();
        for c in &self.contestants {
            if c.ranking.len() != n {
                return Err(CoreError::RankingLength {
                    contestant: c.id.to_string(),
                    expected: n,
                    got: c.ranking.len(),
                });
            }
            if !c.ranking.is_permutation_of(n) {
                return Err(CoreError::NotAPermutation {
                    contestant: c.id.to_string(),
                });
            }
        }
        Ok(())
    }
}
