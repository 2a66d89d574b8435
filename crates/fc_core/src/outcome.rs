//! Resolution states and outcome vectors.
//!
//! A `Resolution` is what the contest currently knows about a question
//! (`Yes`, `No`, or still `Pending`). An `OutcomeVector` is one complete
//! hypothetical resolution of every question; pending states are not
//! representable in it. Vectors are ephemeral: the enumerator materializes
//! one, the winner resolver classifies it, and it is discarded.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What is currently known about a question.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Resolution {
    Yes,
    No,
    Pending,
}

impl Resolution {
    /// The fixed outcome, if the question is already resolved.
    pub fn as_outcome(self) -> Option<Outcome> {
        match self {
            Resolution::Yes => Some(Outcome::Yes),
            Resolution::No => Some(Outcome::No),
            Resolution::Pending => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Resolution::Pending)
    }
}

/// A fully-resolved question outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    Yes,
    No,
}

/// One complete hypothetical resolution of every question, position-aligned
/// with the contest's question sequence.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OutcomeVector(Vec<Outcome>);

impl OutcomeVector {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self(outcomes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Outcome {
        self.0[i]
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.0.iter().copied()
    }

    /// Number of `Yes` positions in the vector.
    pub fn yes_count(&self) -> u32 {
        self.0.iter().filter(|o| **o == Outcome::Yes).count() as u32
    }

    /// Compact structured key ("yn…"), stable across runs. For diagnostics
    /// and aggregation keys; never parsed back.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|o| match o {
                Outcome::Yes => 'y',
                Outcome::No => 'n',
            })
            .collect()
    }
}

impl fmt::Display for OutcomeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn yes_count_counts_only_yes() {
        let v = OutcomeVector::new(vec![Outcome::Yes, Outcome::No, Outcome::Yes]);
        assert_eq!(v.yes_count(), 2);
    }

    #[test]
    fn key_is_positional() {
        let v = OutcomeVector::new(vec![Outcome::Yes, Outcome::No]);
        assert_eq!(v.key(), "yn");
    }

    #[test]
    fn pending_has_no_outcome() {
        assert_eq!(Resolution::Pending.as_outcome(), None);
        assert_eq!(Resolution::Yes.as_outcome(), Some(Outcome::Yes));
    }
}
