//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Digests are SHA-256 over **canonical JSON bytes**, lowercase hex.
//! - `RES:` ids derive from the canonical bytes of a result body (without
//!   its own id field); `RUN:` ids combine a strict UTC timestamp with a
//!   shortened digest of the run-record body.
//!
//! Use `sha256_canonical(..)` for JSON values/structs and `sha256_hex(..)`
//! for raw bytes.

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};
use fc_core::ids::{ResultId, RunId};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Lowercase SHA-256 hex of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// Build `"RES:<hex64>"` from a result body (serialized canonically,
/// without the id itself). The returned string always parses as a
/// `fc_core::ids::ResultId`.
pub fn res_id_from_canonical<T: Serialize>(body: &T) -> IoResult<String> {
    let id = format!("RES:{}", sha256_canonical(body)?);
    debug_assert!(id.parse::<ResultId>().is_ok());
    Ok(id)
}

/// Build `"RUN:<ts>-<hex16>"` from a strict UTC timestamp and a run-record
/// body. Rejects timestamps that do not match `YYYY-MM-DDTHH:MM:SSZ`.
pub fn run_id_from_canonical<T: Serialize>(timestamp_utc: &str, body: &T) -> IoResult<String> {
    let digest = sha256_canonical(body)?;
    let candidate = format!("RUN:{timestamp_utc}-{}", &digest[..16]);
    candidate
        .parse::<RunId>()
        .map_err(|_| IoError::Hash(format!("invalid run timestamp: {timestamp_utc:?}")))?;
    Ok(candidate)
}
