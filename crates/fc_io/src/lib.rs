//! fc_io — I/O crate for the forecast contest engine.
//!
//! - Contest documents are local JSON files; there is no network surface.
//! - Anything hashed goes through canonical JSON bytes (sorted keys,
//!   compact, no trailing newline), so digests are independent of the
//!   source file's formatting.
//! - Shared error type (`IoError`) with `From` conversions used across the
//!   file modules; the public surface stays stable, details live in
//!   submodules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for fc_io (used by canonical_json/hasher/loader).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem read errors.
    #[error("read error: {0}")]
    Read(String),

    /// Filesystem write errors (temp file, fsync, rename).
    #[error("write error: {0}")]
    Write(String),

    /// JSON serialization/deserialization errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Canonicalization failures.
    #[error("canonicalization error: {0}")]
    Canon(String),

    /// Hashing / id-building failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Contest-document shape problems (bad ids, missing fields).
    #[error("contest error: {0}")]
    Contest(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json does not keep a pointer; default to root. Callers may
        // enrich this at higher layers.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

/// Lightweight re-exports so downstream crates can do `use fc_io::prelude::*;`.
pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::canonical_json;
    pub use crate::hasher;
    pub use crate::loader;

    pub use crate::canonical_json::to_canonical_bytes;
    pub use crate::hasher::sha256_hex;
    pub use crate::loader::{load_contest_path, LoadedContest};
}
