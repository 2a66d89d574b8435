//! Canonical JSON utilities.
//!
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact (no extra spaces, no trailing newline)
//! - Atomic write: temp file in the same dir + fsync + rename

use crate::{IoError, IoResult};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

/// Canonical JSON bytes of any serializable value (via `serde_json::Value`).
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    Ok(value_to_canonical_bytes(&v))
}

/// Canonical JSON bytes of an already-parsed `Value`.
pub fn value_to_canonical_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out);
    out
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => {
            // serde_json produces a correctly escaped JSON string literal.
            let quoted = serde_json::to_string(s).expect("string serialization cannot fail");
            out.extend_from_slice(quoted.as_bytes());
        }
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push(b'{');
            for (i, k) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let quoted = serde_json::to_string(k).expect("string serialization cannot fail");
                out.extend_from_slice(quoted.as_bytes());
                out.push(b':');
                write_canonical_value(&map[k.as_str()], out);
            }
            out.push(b'}');
        }
    }
}

/// Write `value` as canonical JSON to `path` atomically: temp file next to
/// the destination, fsync, rename.
pub fn write_canonical_file<T: Serialize>(path: &Path, value: &T) -> IoResult<()> {
    let bytes = to_canonical_bytes(value)?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| Path::new(".").to_path_buf());
    fs::create_dir_all(&parent).map_err(|e| IoError::Write(format!("{}: {e}", parent.display())))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| IoError::Write(format!("{}: path has no file name", path.display())))?;
    let tmp = parent.join(format!("{}.tmp", file_name.to_string_lossy()));

    let mut tf = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|e| IoError::Write(format!("{}: {e}", tmp.display())))?;
    tf.write_all(&bytes)
        .and_then(|_| tf.sync_all())
        .map_err(|e| IoError::Write(format!("{}: {e}", tmp.display())))?;
    drop(tf);

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        IoError::Write(format!("{}: {e}", path.display()))
    })?;
    Ok(())
}
