//! # Entity Identifiers
//!
//! Structured addresses for ledger entities. Every account, token, and
//! NFT lives at a `(shard, realm, number)` triple, rendered in text as
//! `shard.realm.num`, optionally followed by a network-bound `-ccccc`
//! checksum, and for NFTs by an `@serial` suffix.
//!
//! ## Architecture
//!
//! ```text
//! checksum.rs   — LedgerId and the five-letter checksum digest
//! account_id.rs — AccountId (accounts, also used as node addresses)
//! token_id.rs   — TokenId
//! nft_id.rs     — NftId (a TokenId plus a serial number; composition)
//! endpoint.rs   — Endpoint (node address-book records)
//! ```
//!
//! ## Identity vs. annotation
//!
//! Equality, hashing, and ordering of every identifier cover the numeric
//! triple *only*. A checksum is an annotation relative to one ledger:
//! the same id carries a different checksum on every network, so letting
//! it participate in identity would make `0.0.123` unequal to itself.
//! Parsed checksums are retained solely so that a later
//! `validate_checksum` call can compare them against the recomputed
//! value for the caller's ledger.

use thiserror::Error;

pub mod account_id;
pub mod checksum;
pub mod endpoint;
pub mod nft_id;
pub mod token_id;

pub use account_id::AccountId;
pub use checksum::{entity_checksum, LedgerId};
pub use endpoint::{Endpoint, ServiceEndpoint};
pub use nft_id::NftId;
pub use token_id::TokenId;

use crate::config;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing or validating entity identifiers.
///
/// `Malformed` and `ChecksumMismatch` are deliberately distinct: the
/// first means the text is not an entity id at all, the second means it
/// is a perfectly well-formed id whose checksum belongs to a different
/// ledger. Callers handle them differently (fix the input vs. check
/// which network you are talking to), so they must never be conflated.
#[derive(Debug, Error)]
pub enum EntityIdError {
    /// The text does not match the `shard.realm.num[-ccccc][@serial]`
    /// grammar.
    #[error("malformed entity id: {text:?}")]
    Malformed {
        /// The offending input.
        text: String,
    },

    /// The parsed checksum does not match the value recomputed for the
    /// ledger supplied at validation time.
    #[error("entity id checksum mismatch: expected {expected} for this ledger, got {actual}")]
    ChecksumMismatch {
        /// The checksum recomputed for the caller's ledger.
        expected: String,
        /// The checksum that was parsed from the input.
        actual: String,
    },
}

// ---------------------------------------------------------------------------
// Shared parse grammar
// ---------------------------------------------------------------------------

/// Parses `shard.realm.num` optionally followed by `-ccccc`.
///
/// Segments must be bare ASCII decimal (no signs, no whitespace); the
/// checksum, when present, must be exactly five lowercase letters.
/// Checksum *validation* does not happen here: parsing has no ledger to
/// validate against, so the checksum is carried along for later.
pub(crate) fn parse_triple(text: &str) -> Result<(u64, u64, u64, Option<String>), EntityIdError> {
    let malformed = || EntityIdError::Malformed {
        text: text.to_string(),
    };

    let (triple, checksum) = match text.split_once('-') {
        None => (text, None),
        Some((triple, checksum)) => {
            if checksum.len() != config::CHECKSUM_LENGTH
                || !checksum.bytes().all(|b| b.is_ascii_lowercase())
            {
                return Err(malformed());
            }
            (triple, Some(checksum.to_string()))
        }
    };

    let mut segments = triple.split('.');
    let shard = parse_segment(segments.next()).ok_or_else(malformed)?;
    let realm = parse_segment(segments.next()).ok_or_else(malformed)?;
    let num = parse_segment(segments.next()).ok_or_else(malformed)?;
    if segments.next().is_some() {
        return Err(malformed());
    }

    Ok((shard, realm, num, checksum))
}

/// A single unsigned decimal segment. Rejects empty strings and anything
/// `u64::from_str` would tolerate beyond bare digits (such as a leading
/// `+`).
fn parse_segment(segment: Option<&str>) -> Option<u64> {
    let segment = segment?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_triple() {
        assert_eq!(parse_triple("0.0.5005").unwrap(), (0, 0, 5005, None));
        assert_eq!(parse_triple("4.2.0").unwrap(), (4, 2, 0, None));
    }

    #[test]
    fn parses_triple_with_checksum() {
        let (shard, realm, num, checksum) = parse_triple("0.0.123-vfmkw").unwrap();
        assert_eq!((shard, realm, num), (0, 0, 123));
        assert_eq!(checksum.as_deref(), Some("vfmkw"));
    }

    #[test]
    fn rejects_wrong_separator_count() {
        for text in ["0.0", "0.0.0.0", "123", ""] {
            assert!(matches!(
                parse_triple(text),
                Err(EntityIdError::Malformed { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_numeric_segments() {
        for text in ["a.0.1", "0.-1.2", "0.0.+7", "0. 0.1", "0..1"] {
            assert!(parse_triple(text).is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn rejects_bad_checksum_alphabet() {
        for text in [
            "0.0.123-VFMKW",
            "0.0.123-vfmk",
            "0.0.123-vfmkw1",
            "0.0.123-",
        ] {
            assert!(parse_triple(text).is_err(), "accepted {:?}", text);
        }
    }
}
