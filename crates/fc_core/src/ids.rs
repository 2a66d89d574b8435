//! Newtypes and parsers for output/digest identifiers.
//!
//! - `Sha256` — 64-hex lowercase digest.
//! - `ResultId` — `"RES:" + <64-hex>`; derived from the canonical bytes of a
//!   result body by `fc_io::hasher`.
//! - `RunId` — `"RUN:" + <YYYY-MM-DDTHH:MM:SSZ> + "-" + <8..64-hex>`.
//!
//! Parsers are strict; anything that does not match the grammar is rejected.

use crate::errors::CoreError;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn is_lower_hex_len(s: &str, n: usize) -> bool {
    s.len() == n && is_lower_hex(s)
}

/// Strict "YYYY-MM-DDTHH:MM:SSZ" shape check (length 20).
pub(crate) fn is_ts_utc_z(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 20 {
        return false;
    }
    matches!(b[4], b'-')
        && matches!(b[7], b'-')
        && matches!(b[10], b'T')
        && matches!(b[13], b':')
        && matches!(b[16], b':')
        && matches!(b[19], b'Z')
        && b.iter().enumerate().all(|(i, c)| match i {
            0..=3 | 5..=6 | 8..=9 | 11..=12 | 14..=15 | 17..=18 => matches!(c, b'0'..=b'9'),
            4 | 7 | 10 | 13 | 16 | 19 => true,
            _ => false,
        })
}

/// 64-hex lowercase (digest/fingerprint).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sha256(String);

impl Sha256 {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sha256 {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_lower_hex_len(s, 64) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidHex)
        }
    }
}

/// "RES:" + 64-hex (lowercase)
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultId(String);

impl ResultId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResultId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("RES:").ok_or(CoreError::InvalidId)?;
        if is_lower_hex_len(rest, 64) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidId)
        }
    }
}

/// "RUN:" + "<YYYY-MM-DDTHH:MM:SSZ>" + "-" + "<8..64-hex lowercase>"
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunId(String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RunId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("RUN:").ok_or(CoreError::InvalidId)?;
        // The timestamp is fixed-width (20 bytes) and itself contains dashes,
        // so split positionally rather than on the first '-'.
        if rest.len() < 22 || !rest.is_char_boundary(20) {
            return Err(CoreError::InvalidId);
        }
        let (ts, tail) = rest.split_at(20);
        let hash = tail.strip_prefix('-').ok_or(CoreError::InvalidId)?;
        if !is_ts_utc_z(ts) {
            return Err(CoreError::InvalidTimestamp);
        }
        if !(8..=64).contains(&hash.len()) || !is_lower_hex(hash) {
            return Err(CoreError::InvalidId);
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX64: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn sha256_accepts_lower_hex64_only() {
        assert!(HEX64.parse::<Sha256>().is_ok());
        assert!("ABC".parse::<Sha256>().is_err());
    }

    #[test]
    fn result_id_requires_prefix_and_hex() {
        let ok = alloc::format!("RES:{HEX64}");
        assert!(ok.parse::<ResultId>().is_ok());
        assert!(HEX64.parse::<ResultId>().is_err());
        assert!("RES:zz".parse::<ResultId>().is_err());
    }

    #[test]
    fn run_id_requires_timestamp_then_hash() {
        let ok = alloc::format!("RUN:2025-08-12T10:00:00Z-{}", &HEX64[..16]);
        assert!(ok.parse::<RunId>().is_ok());
        assert!("RUN:not-a-ts-abcdef01".parse::<RunId>().is_err());
        assert_eq!(
            "RUN:2025-08-12T10:00:00+-abcdef01".parse::<RunId>(),
            Err(CoreError::InvalidTimestamp)
        );
    }

    #[test]
    fn run_id_splits_at_first_dash_after_timestamp() {
        // The timestamp itself contains dashes; split_once must not trip on them.
        assert!("RUN:2025-08-12T10:00:00Z-deadbeef".parse::<RunId>().is_ok());
    }
}
