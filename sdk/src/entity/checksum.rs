//! Network-bound entity checksums.
//!
//! A checksum is a five-letter digest of an entity address (the
//! `shard.realm.num` digits) mixed with the target ledger's identity.
//! The same numeric id therefore renders a *different* checksum on every
//! network, which is the whole point: a mainnet address pasted into a
//! testnet tool fails validation instead of silently addressing the
//! wrong ledger.
//!
//! The digest is a pair of weighted digit sums (mod 11) combined with a
//! rolling base-31 hash of the digits (mod 26³) and of the ledger id
//! bytes (mod 26⁵), scrambled by a prime multiplier and written out as
//! five lowercase base-26 letters. It is a pure function of
//! (address, ledger id): deterministic, fixed length, no state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// LedgerId
// ---------------------------------------------------------------------------

/// Opaque identity of a target ledger.
///
/// The well-known public networks use single-byte ids; private mirrors
/// and local networks may use anything. The SDK never interprets the
/// bytes, it only feeds them to the checksum digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerId {
    bytes: Vec<u8>,
}

impl LedgerId {
    /// The public mainnet ledger.
    pub fn mainnet() -> Self {
        LedgerId {
            bytes: vec![config::LEDGER_ID_MAINNET],
        }
    }

    /// The public testnet ledger.
    pub fn testnet() -> Self {
        LedgerId {
            bytes: vec![config::LEDGER_ID_TESTNET],
        }
    }

    /// The public previewnet ledger.
    pub fn previewnet() -> Self {
        LedgerId {
            bytes: vec![config::LEDGER_ID_PREVIEWNET],
        }
    }

    /// An arbitrary ledger identity.
    pub fn new(bytes: Vec<u8>) -> Self {
        LedgerId { bytes }
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.bytes))
    }
}

// ---------------------------------------------------------------------------
// Checksum digest
// ---------------------------------------------------------------------------

/// Computes the five-letter checksum for an entity triple on a ledger.
///
/// The address fed to the digest is always the bare `shard.realm.num`
/// form. For an NFT the serial is *not* part of the digest; the checksum
/// covers the token triple only.
pub fn entity_checksum(ledger_id: &LedgerId, shard: u64, realm: u64, num: u64) -> String {
    // Base-26 moduli for the three-letter and five-letter rolling hashes,
    // and the prime scrambler applied to the combined digest.
    const P3: u64 = 26 * 26 * 26;
    const P5: u64 = 26 * 26 * 26 * 26 * 26;
    const M: u64 = 1_000_003;

    let address = format!("{}.{}.{}", shard, realm, num);

    // Digits of the address, with '.' mapped to 10 so separators
    // contribute to the digest and "1.23" differs from "12.3".
    let digits: Vec<u64> = address
        .bytes()
        .map(|b| if b == b'.' { 10 } else { u64::from(b - b'0') })
        .collect();

    let mut sd0: u64 = 0; // sum of even-position digits, mod 11
    let mut sd1: u64 = 0; // sum of odd-position digits, mod 11
    let mut sd: u64 = 0; // rolling base-31 hash of all digits, mod 26^3
    for (i, d) in digits.iter().enumerate() {
        sd = (sd * 31 + d) % P3;
        if i % 2 == 0 {
            sd0 = (sd0 + d) % 11;
        } else {
            sd1 = (sd1 + d) % 11;
        }
    }

    // Rolling hash of the ledger id bytes, padded with six zero bytes so
    // even an empty id contributes a nonzero mixing width.
    let mut sh: u64 = 0;
    for byte in ledger_id.as_bytes().iter().copied().chain([0u8; 6]) {
        sh = (sh * 31 + u64::from(byte)) % P5;
    }

    let mut c = ((((digits.len() as u64 % 5) * 11 + sd0) * 11 + sd1) * P3 + sd + sh) % P5;
    c = (c * M) % P5;

    let mut letters = [0u8; 5];
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (c % 26) as u8;
        c /= 26;
    }

    // Always five ASCII lowercase letters, so this cannot fail.
    String::from_utf8(letters.to_vec()).expect("checksum letters are always ASCII")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
