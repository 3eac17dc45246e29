//! Canonical serialization for cryptographic hashing
//!
//! Every hash in the chain is SHA-256 over a canonical JSON rendering:
//! object keys sorted, no insignificant whitespace. Two values that are
//! structurally equal always hash to the same hex digest, regardless of
//! struct field declaration order.

use crate::Result;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Render a value as canonical JSON (sorted keys, compact)
///
/// Serialization goes through `serde_json::Value`, whose object maps are
/// ordered, so nested keys come out sorted at every level.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(value.to_string())
}

/// SHA-256 of arbitrary bytes, as a lowercase hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash a value over its canonical JSON rendering
pub fn hash_canonical<T: Serialize>(value: &T) -> Result<String> {
    Ok(sha256_hex(canonical_json(value)?.as_bytes()))
}

/// Hash a value with its top-level `hash` field removed
///
/// Transactions and blocks carry their own hash; the stored field must
/// never participate in its own preimage, otherwise recomputation during
/// verification could not reproduce the original digest.
pub fn hash_excluding_own<T: Serialize>(value: &T) -> Result<String> {
    let mut value: Value = serde_json::to_value(value)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("hash");
    }
    Ok(sha256_hex(value.to_string().as_bytes()))
}
