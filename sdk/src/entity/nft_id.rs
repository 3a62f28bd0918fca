//! Non-fungible token identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::entity::token_id::TokenId;
use crate::entity::{parse_triple, EntityIdError};
use crate::wire;

/// The id of one serial of a non-fungible token: a [`TokenId`] plus a
/// positive serial number.
///
/// Text form is `shard.realm.num@serial`; a checksum, when present,
/// sits on the token part (`0.0.123-vfmkw@7584`) because the serial is
/// not part of the checksum digest.
///
/// # Examples
///
/// ```
/// use hgraph_sdk::entity::NftId;
///
/// let nft: NftId = "0.0.5005@1234".parse().unwrap();
/// assert_eq!(nft.token_id.num, 5005);
/// assert_eq!(nft.serial, 1234);
/// assert_eq!(nft.to_string(), "0.0.5005@1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NftId {
    /// The token this serial belongs to.
    pub token_id: TokenId,
    /// The serial number, minted starting at 1.
    pub serial: u64,
}

impl NftId {
    /// An NFT id from a token id and serial number.
    pub const fn new(token_id: TokenId, serial: u64) -> Self {
        NftId { token_id, serial }
    }

    /// Renders this id with the token checksum for the client's ledger.
    pub fn to_string_with_checksum(&self, client: &Client) -> String {
        format!(
            "{}@{}",
            self.token_id.to_string_with_checksum(client),
            self.serial
        )
    }

    /// Verifies the token part's parsed checksum against the client's
    /// ledger.
    pub fn validate_checksum(&self, client: &Client) -> Result<(), EntityIdError> {
        self.token_id.validate_checksum(client)
    }

    /// Encodes this id in the wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode(self)
    }

    /// Decodes an id from the wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, wire::WireError> {
        wire::decode(bytes)
    }
}

impl FromStr for NftId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || EntityIdError::Malformed {
            text: s.to_string(),
        };

        let (token_part, serial_part) = s.split_once('@').ok_or_else(malformed)?;
        if serial_part.is_empty() || !serial_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let serial: u64 = serial_part.parse().map_err(|_| malformed())?;
        // Serials are minted from 1; zero never addresses anything.
        if serial == 0 {
            return Err(malformed());
        }

        let (shard, realm, num, checksum) = parse_triple(token_part)?;
        Ok(NftId {
            token_id: TokenId::with_checksum(shard, realm, num, checksum),
            serial,
        })
    }
}

impl fmt::Display for NftId {
    /// Canonical form, without checksum.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.token_id, self.serial)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;

    #[test]
    fn parse_and_reserialize_canonical_form() {
        let nft: NftId = "0.0.5005@1234".parse().unwrap();
        assert_eq!(nft.token_id, TokenId::new(0, 0, 5005));
        assert_eq!(nft.serial, 1234);
        // Re-serializes identically, with no checksum segment.
        assert_eq!(nft.to_string(), "0.0.5005@1234");
    }

    #[test]
    fn parse_with_checksum_on_token_part() {
        let nft: NftId = "0.0.123-vfmkw@7584".parse().unwrap();
        assert_eq!(nft.token_id.checksum(), Some("vfmkw"));
        assert_eq!(nft.serial, 7584);
        // The canonical form drops the checksum.
        assert_eq!(nft.to_string(), "0.0.123@7584");
        assert!(nft.validate_checksum(&Client::for_mainnet()).is_ok());
    }

    #[test]
    fn checksum_rendering_covers_token_only() {
        let nft = TokenId::new(0, 0, 123).nft(584_903);
        assert_eq!(
            nft.to_string_with_checksum(&Client::for_testnet()),
            "0.0.123-esxsf@584903"
        );
    }

    #[test]
    fn bytes_roundtrip_is_lossless() {
        let nft = TokenId::new(0, 0, 5005).nft(574_489);
        let back = NftId::from_bytes(&nft.to_bytes()).unwrap();
        assert_eq!(back, nft);
        assert_eq!(back.to_string(), "0.0.5005@574489");
    }

    #[test]
    fn rejects_malformed_serials() {
        for text in [
            "0.0.5005",
            "0.0.5005@",
            "0.0.5005@0",
            "0.0.5005@-1",
            "0.0.5005@12a",
            "0.0.5005@1@2",
        ] {
            assert!(
                matches!(
                    text.parse::<NftId>(),
                    Err(EntityIdError::Malformed { .. })
                ),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn identity_includes_the_serial() {
        let a = TokenId::new(0, 0, 5005).nft(1);
        let b = TokenId::new(0, 0, 5005).nft(2);
        assert_ne!(a, b);
    }
}
