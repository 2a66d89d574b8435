//! fc_core — Core types, domains, ordering helpers for the forecast contest
//! engine.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`fc_io`, `fc_algo`, `fc_pipeline`, `fc_report`, `fc_cli`).
//!
//! - Output IDs: `RES:`, `RUN:`
//! - Registry tokens: `QuestionId`, `ContestantId`
//! - Contest domain: resolution states, outcome vectors, rankings
//! - Tie-policy variables (`TiePolicy`, `Params`)
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod contest;
pub mod determinism;
pub mod errors;
pub mod ids;
pub mod outcome;
pub mod tokens;
pub mod variables;

pub use contest::{Contest, Contestant, Question, Ranking};
pub use errors::CoreError;
pub use outcome::{Outcome, OutcomeVector, Resolution};
pub use tokens::{ContestantId, QuestionId};
pub use variables::{Params, TiePolicy};
