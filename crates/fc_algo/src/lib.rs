//! fc_algo — pure algorithm layer for the forecast contest engine.
//!
//! Everything in this crate is deterministic and side-effect-free: no I/O,
//! no RNG, no clocks. It depends only on `fc_core` and is driven by
//! `fc_pipeline`, which owns orchestration and aggregation.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod crowd;
pub mod enumerate;
pub mod scoring;
pub mod tie_break;
pub mod winner;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use crowd::{crowd_ranking, synthesize_crowd, CrowdError};
pub use enumerate::{EnumerateError, OutcomeIter, OutcomeSpace, MAX_PENDING};
pub use scoring::{banked_score, contributing_ranks, max_total_score, score};
pub use tie_break::break_tie;
pub use winner::{resolve, WinResult, WinnerError};
