//! Token identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::entity::account_id::validate_parsed_checksum;
use crate::entity::checksum::entity_checksum;
use crate::entity::nft_id::NftId;
use crate::entity::{parse_triple, EntityIdError};
use crate::wire;

/// The id of a token type on the ledger, as `shard.realm.num`.
///
/// A token id addresses the token *class*; an individual serial of a
/// non-fungible token is addressed by an [`NftId`], built with
/// [`TokenId::nft`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenId {
    /// The shard this token lives in.
    pub shard: u64,
    /// The realm within the shard.
    pub realm: u64,
    /// The token number within the realm.
    pub num: u64,

    /// Parsed checksum annotation; excluded from identity and the wire.
    #[serde(skip)]
    checksum: Option<String>,
}

impl TokenId {
    /// A token id from its numeric triple.
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        TokenId {
            shard,
            realm,
            num,
            checksum: None,
        }
    }

    /// The id of one serial of this (non-fungible) token.
    pub fn nft(&self, serial: u64) -> NftId {
        NftId {
            token_id: self.clone(),
            serial,
        }
    }

    /// The checksum parsed alongside this id, if any.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Renders this id with the checksum for the client's ledger.
    /// Recomputed on every call, never cached.
    pub fn to_string_with_checksum(&self, client: &Client) -> String {
        let checksum = entity_checksum(client.ledger_id(), self.shard, self.realm, self.num);
        format!("{}.{}.{}-{}", self.shard, self.realm, self.num, checksum)
    }

    /// Verifies the parsed checksum (if any) against the client's ledger.
    pub fn validate_checksum(&self, client: &Client) -> Result<(), EntityIdError> {
        validate_parsed_checksum(
            self.checksum.as_deref(),
            client,
            self.shard,
            self.realm,
            self.num,
        )
    }

    /// Encodes this id in the wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode(self)
    }

    /// Decodes an id from the wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, wire::WireError> {
        wire::decode(bytes)
    }

    pub(crate) fn with_checksum(shard: u64, realm: u64, num: u64, checksum: Option<String>) -> Self {
        TokenId {
            shard,
            realm,
            num,
            checksum,
        }
    }
}

impl FromStr for TokenId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (shard, realm, num, checksum) = parse_triple(s)?;
        Ok(TokenId::with_checksum(shard, realm, num, checksum))
    }
}

impl fmt::Display for TokenId {
    /// Canonical form, without checksum.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

// Identity covers the numeric triple only.
impl PartialEq for TokenId {
    fn eq(&self, other: &Self) -> bool {
        (self.shard, self.realm, self.num) == (other.shard, other.realm, other.num)
    }
}

impl Eq for TokenId {}

impl Hash for TokenId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.shard, self.realm, self.num).hash(state);
    }
}

impl PartialOrd for TokenId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.shard, self.realm, self.num).cmp(&(other.shard, other.realm, other.num))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
