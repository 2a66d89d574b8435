//! Engine parameter domains.
//!
//! The tie-break policy is a policy choice, not a derived necessity; it is
//! therefore carried as data so the resolver can be swapped without touching
//! enumeration or aggregation. The default policy is the contest's
//! historical one: reward the contestant whose correct-prediction ranks are
//! most concentrated at the top.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a max-score tie is broken into a single winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TiePolicy {
    /// Compare descending contributing-rank lists level by level; fall back
    /// to identifier order when the lists are fully identical.
    #[default]
    RankConcentration,
    /// Skip the rank comparison entirely; lowest identifier wins. Exists to
    /// exercise the policy seam, not as a sanctioned contest rule.
    IdentifierOrder,
}

impl TiePolicy {
    /// Stable wire token echoed into run records.
    pub fn as_token(self) -> &'static str {
        match self {
            TiePolicy::RankConcentration => "rank_concentration",
            TiePolicy::IdentifierOrder => "identifier_order",
        }
    }
}

/// Engine parameters (non-exhaustive by design).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Params {
    pub tie_policy: TiePolicy,
}
