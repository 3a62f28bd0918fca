//! # Wire Codec
//!
//! The binary protocol schema boundary. Everything that crosses the wire
//! (entity ids, transaction bodies, whole signed transactions) is a
//! serde model encoded with bincode through these two functions, so the
//! byte layout is owned in exactly one place.
//!
//! Two laws hold for every wire-facing type `T`:
//!
//! 1. `decode(&encode(&x)) == Ok(x)` for every valid `x: T`.
//! 2. `encode` is deterministic: the same value always produces the same
//!    bytes. Signature maps are `BTreeMap`s and every collection is
//!    ordered, so re-encoding a decoded transaction reproduces the input
//!    byte for byte.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from decoding wire bytes.
#[derive(Debug, Error)]
pub enum WireError {
    /// The bytes do not decode as the expected schema.
    #[error("wire decode failed: {0}")]
    Decode(#[from] bincode::Error),

    /// The bytes decode structurally but violate a schema invariant
    /// (for example, a transaction record with no transaction id).
    #[error("wire value is invalid: {0}")]
    Invalid(String),
}

/// Encodes a wire model value.
///
/// Infallible by construction: every wire-facing type in this crate is a
/// plain serde derive over sized fields, for which bincode cannot fail.
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    bincode::serialize(value).expect("wire model types always serialize")
}

/// Decodes a wire model value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
    Ok(bincode::deserialize(bytes)?)
}
