//! Account identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::entity::checksum::entity_checksum;
use crate::entity::{parse_triple, EntityIdError};
use crate::wire;

/// The id of a ledger account, as `shard.realm.num`.
///
/// Node accounts (the candidate routing targets of a transaction) are
/// ordinary accounts and use this same type.
///
/// # Examples
///
/// ```
/// use hgraph_sdk::entity::AccountId;
///
/// let id: AccountId = "0.0.5005".parse().unwrap();
/// assert_eq!((id.shard, id.realm, id.num), (0, 0, 5005));
/// assert_eq!(id.to_string(), "0.0.5005");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountId {
    /// The shard this account lives in.
    pub shard: u64,
    /// The realm within the shard.
    pub realm: u64,
    /// The account number within the realm.
    pub num: u64,

    /// Checksum carried over from parsing, if the input had one. Never
    /// part of identity and never written to the wire; kept only so a
    /// later `validate_checksum` can compare it against a ledger.
    #[serde(skip)]
    checksum: Option<String>,
}

impl AccountId {
    /// An account id from its numeric triple.
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        AccountId {
            shard,
            realm,
            num,
            checksum: None,
        }
    }

    /// The checksum parsed alongside this id, if any.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Renders this id with the checksum for the client's ledger.
    ///
    /// Computed fresh on every call: a checksum is only meaningful
    /// relative to one ledger, so caching one on the id would go stale
    /// the moment the id is shown for a different network.
    pub fn to_string_with_checksum(&self, client: &Client) -> String {
        let checksum = entity_checksum(client.ledger_id(), self.shard, self.realm, self.num);
        format!("{}.{}.{}-{}", self.shard, self.realm, self.num, checksum)
    }

    /// Verifies the parsed checksum (if any) against the client's ledger.
    ///
    /// An id without a checksum always validates. A mismatch means the
    /// id was copied from a different network and must not be used here.
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
}

/// Shared checksum-validation step for all id flavors.
pub(crate) fn validate_parsed_checksum(
    parsed: Option<&str>,
    client: &Client,
    shard: u64,
    realm: u64,
    num: u64,
) -> Result<(), EntityIdError> {
    let Some(actual) = parsed else {
        return Ok(());
    };
    let expected = entity_checksum(client.ledger_id(), shard, realm, num);
    if actual == expected {
        Ok(())
    } else {
        Err(EntityIdError::ChecksumMismatch {
            expected,
            actual: actual.to_string(),
        })
    }
}

impl FromStr for AccountId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (shard, realm, num, checksum) = parse_triple(s)?;
        Ok(AccountId {
            shard,
            realm,
            num,
            checksum,
        })
    }
}

impl fmt::Display for AccountId {
    /// Canonical form, without checksum.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

// Identity covers the numeric triple only; see the module docs for why
// the checksum is excluded.
impl PartialEq for AccountId {
    fn eq(&self, other: &Self) -> bool {
        (self.shard, self.realm, self.num) == (other.shard, other.realm, other.num)
    }
}

impl Eq for AccountId {}

impl Hash for AccountId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.shard, self.realm, self.num).hash(state);
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.shard, self.realm, self.num).cmp(&(other.shard, other.realm, other.num))
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
    fn parse_display_roundtrip() {
        let id: AccountId = "0.0.5005".parse().unwrap();
        assert_eq!(id, AccountId::new(0, 0, 5005));
        assert_eq!(id.to_string(), "0.0.5005");
        assert_eq!(id.to_string().parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn bytes_roundtrip_is_lossless() {
        for id in [
            AccountId::new(0, 0, 0),
            AccountId::new(0, 0, 5005),
            AccountId::new(u64::MAX, u64::MAX, u64::MAX),
        ] {
            let back = AccountId::from_bytes(&id.to_bytes()).unwrap();
            assert_eq!(back, id);
        }
    }

    #[test]
    fn checksum_excluded_from_identity() {
        use std::collections::hash_map::DefaultHasher;

        let plain: AccountId = "0.0.123".parse().unwrap();
        let checksummed: AccountId = "0.0.123-vfmkw".parse().unwrap();
        assert_eq!(plain, checksummed);

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        plain.hash(&mut h1);
        checksummed.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn checksum_not_written_to_wire() {
        let checksummed: AccountId = "0.0.123-vfmkw".parse().unwrap();
        let back = AccountId::from_bytes(&checksummed.to_bytes()).unwrap();
        assert_eq!(back.checksum(), None);
        assert_eq!(back, checksummed);
    }

    #[test]
    fn to_string_with_checksum_matches_known_vector() {
        let id = AccountId::new(0, 0, 123);
        let client = Client::for_mainnet();
        assert_eq!(id.to_string_with_checksum(&client), "0.0.123-vfmkw");
    }

    #[test]
    fn validate_checksum_against_matching_ledger() {
        let client = Client::for_mainnet();
        let rendered = AccountId::new(0, 0, 123).to_string_with_checksum(&client);
        let parsed: AccountId = rendered.parse().unwrap();
        assert!(parsed.validate_checksum(&client).is_ok());
    }

    #[test]
    fn validate_checksum_against_wrong_ledger_fails() {
        let mainnet = Client::for_mainnet();
        let testnet = Client::for_testnet();
        let rendered = AccountId::new(0, 0, 123).to_string_with_checksum(&mainnet);
        let parsed: AccountId = rendered.parse().unwrap();

        match parsed.validate_checksum(&testnet) {
            Err(EntityIdError::ChecksumMismatch { expected, actual }) => {
                assert_eq!(actual, "vfmkw");
                assert_eq!(expected, "esxsf");
            }
            other => panic!("expected ChecksumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn no_checksum_always_validates() {
        let id = AccountId::new(0, 0, 123);
        assert!(id.validate_checksum(&Client::for_previewnet()).is_ok());
    }

    #[test]
    fn ordering_is_lexicographic_over_the_triple() {
        let mut ids = vec![
            AccountId::new(1, 0, 0),
            AccountId::new(0, 0, 7),
            AccountId::new(0, 1, 0),
            AccountId::new(0, 0, 3),
        ];
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(AccountId::to_string).collect();
        assert_eq!(rendered, ["0.0.3", "0.0.7", "0.1.0", "1.0.0"]);
    }
}
