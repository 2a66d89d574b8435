//! Loader: read a local contest JSON document, build the typed `Contest`,
//! and digest the canonical bytes for run-record provenance. No network I/O.
//!
//! Wire format (one document per contest):
//!
//! ```json
//! {
//!   "schema_version": "1.x",
//!   "title": "Prediction Contest 2025",
//!   "questions": [
//!     {"id": "A", "text": "…", "outcome": "yes"},
//!     {"id": "B", "outcome": "pending"}
//!   ],
//!   "predictions": {
//!     "SOPH": [5, 2],
//!     "ALIZ": [2, 5]
//!   }
//! }
//! ```
//!
//! `outcome` also accepts the historical single-letter forms `y`/`n`/`m`.
//! Permutation validation is the pipeline's job; the loader only enforces
//! document shape and identifier well-formedness.

use crate::{hasher, IoError, IoResult};
use fc_core::{Contest, Contestant, Question, Ranking, Resolution};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Deserialize)]
enum ResolutionWire {
    #[serde(rename = "yes", alias = "y")]
    Yes,
    #[serde(rename = "no", alias = "n")]
    No,
    #[serde(rename = "pending", alias = "m", alias = "maybe")]
    Pending,
}

impl From<ResolutionWire> for Resolution {
    fn from(w: ResolutionWire) -> Self {
        match w {
            ResolutionWire::Yes => Resolution::Yes,
            ResolutionWire::No => Resolution::No,
            ResolutionWire::Pending => Resolution::Pending,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionWire {
    id: String,
    #[serde(default)]
    text: Option<String>,
    outcome: ResolutionWire,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContestWire {
    #[serde(default)]
    schema_version: Option<String>,
    #[serde(default)]
    title: Option<String>,
    questions: Vec<QuestionWire>,
    /// BTreeMap keeps contestant order deterministic regardless of the
    /// document's key order.
    predictions: BTreeMap<String, Vec<u32>>,
}

/// Loaded, typed, digested contest.
#[derive(Debug)]
pub struct LoadedContest {
    pub contest: Contest,
    /// SHA-256 of the document's canonical JSON bytes.
    pub contest_sha256: String,
    pub schema_version: Option<String>,
}

/// Load a contest document from a file path.
pub fn load_contest_path(path: &Path) -> IoResult<LoadedContest> {
    let bytes =
        fs::read(path).map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    contest_from_slice(&bytes)
}

/// Parse a contest document from raw bytes.
pub fn contest_from_slice(bytes: &[u8]) -> IoResult<LoadedContest> {
    let raw: serde_json::Value = serde_json::from_slice(bytes)?;
    let wire: ContestWire = serde_json::from_value(raw.clone())?;

    // Digest the canonical form so whitespace/key-order differences in the
    // source never change provenance.
    let contest_sha256 = hasher::sha256_canonical(&raw)?;

    let mut questions = Vec::with_capacity(wire.questions.len());
    for q in &wire.questions {
        let id = q
            .id
            .parse()
            .map_err(|_| IoError::Contest(format!("invalid question id: {:?}", q.id)))?;
        questions.push(Question {
            id,
            text: q.text.clone(),
            resolution: q.outcome.into(),
        });
    }

    let mut contestants = Vec::with_capacity(wire.predictions.len());
    for (name, ranks) in &wire.predictions {
        let id = name
            .parse()
            .map_err(|_| IoError::Contest(format!("invalid contestant id: {name:?}")))?;
        contestants.push(Contestant {
            id,
            ranking: Ranking::new(ranks.clone()),
        });
    }

    debug!(
        "loaded contest: {} questions, {} contestants, digest {}",
        questions.len(),
        contestants.len(),
        &contest_sha256[..12]
    );

    Ok(LoadedContest {
        contest: Contest {
            title: wire.title,
            questions,
            contestants,
        },
        contest_sha256,
        schema_version: wire.schema_version,
    })
}
