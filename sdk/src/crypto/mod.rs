//! # Cryptography
//!
//! Ed25519 key and signature wrappers. The SDK consumes signing as a
//! capability: everything above this module hands bytes to a signer and
//! gets a signature back, never touching curve internals.

pub mod keys;

pub use keys::{KeyError, PrivateKey, PublicKey, Signature};
