//! Registry token types (`QuestionId`, `ContestantId`).
//!
//! Tokens are opaque identifiers supplied by the contest document. Contest
//! identifiers in the wild include non-ASCII glyphs, so the charset is
//! deliberately loose: 1..=64 bytes, no whitespace, no control characters.
//! Lexicographic `Ord` on the raw bytes is the total order every
//! deterministic fallback in the engine relies on.

use crate::errors::CoreError;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn is_token(s: &str) -> bool {
    if !(1..=64).contains(&s.len()) {
        return false;
    }
    s.chars().all(|c| !c.is_whitespace() && !c.is_control())
}

macro_rules! def_token {
    ($name:ident) => {
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_token(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(CoreError::InvalidToken)
                }
            }
        }
    };
}

def_token!(QuestionId);
def_token!(ContestantId);
