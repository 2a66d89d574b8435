//! Minimal error set for core-domain validation and parsing.

use alloc::string::String;
use core::fmt;

/// Errors produced by core-domain parsers and invariant checks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoreError {
    InvalidId,
    InvalidToken,
    InvalidHex,
    InvalidTimestamp,
    /// The contest has no questions at all.
    NoQuestions,
    /// The contestant set is empty.
    EmptyField,
    /// A ranking's length does not match the question count.
    RankingLength {
        contestant: String,
        expected: usize,
        got: usize,
    },
    /// A ranking is not a permutation of `1..=N`.
    NotAPermutation { contestant: String },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidId => write!(f, "invalid id"),
            CoreError::InvalidToken => write!(f, "invalid token"),
            CoreError::InvalidHex => write!(f, "invalid hex"),
            CoreError::InvalidTimestamp => write!(f, "invalid timestamp"),
            CoreError::NoQuestions => write!(f, "contest has no questions"),
            CoreError::EmptyField => write!(f, "contestant set is empty"),
            CoreError::RankingLength { contestant, expected, got } => write!(
                f,
                "ranking for {contestant} has {got} entries, expected {expected}"
            ),
            CoreError::NotAPermutation { contestant } => {
                write!(f, "ranking for {contestant} is not a permutation of 1..=N")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
