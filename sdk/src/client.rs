//! # Client Configuration
//!
//! A [`Client`] names a target ledger and carries the defaults that turn
//! a bare builder into a submittable transaction: the node map, an
//! optional operator (payer account + key), and a fee cap. It holds no
//! connections; the transport collaborator does.

use std::net::Ipv4Addr;

use crate::config;
use crate::crypto::PrivateKey;
use crate::entity::{AccountId, Endpoint, LedgerId};
use crate::hbar::Hbar;

/// The account that pays for transactions by default, and the key that
/// authorizes that payment.
pub struct Operator {
    /// The paying account.
    pub account_id: AccountId,
    private_key: PrivateKey,
}

impl Operator {
    /// An operator from its account and key.
    pub fn new(account_id: AccountId, private_key: PrivateKey) -> Self {
        Operator {
            account_id,
            private_key,
        }
    }

    /// The operator's signing key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

/// Configuration for one target ledger.
pub struct Client {
    ledger_id: LedgerId,
    network: Vec<(AccountId, Endpoint)>,
    operator: Option<Operator>,
    default_max_transaction_fee: Hbar,
}

impl Client {
    /// A client for the public mainnet, with its well-known consensus
    /// nodes.
    pub fn for_mainnet() -> Self {
        Client::for_network(
            LedgerId::mainnet(),
            vec![
                (AccountId::new(0, 0, 3), Ipv4Addr::new(35, 237, 200, 180)),
                (AccountId::new(0, 0, 4), Ipv4Addr::new(35, 186, 191, 247)),
                (AccountId::new(0, 0, 5), Ipv4Addr::new(35, 192, 2, 25)),
                (AccountId::new(0, 0, 6), Ipv4Addr::new(35, 199, 161, 108)),
                (AccountId::new(0, 0, 7), Ipv4Addr::new(35, 203, 82, 240)),
            ],
        )
    }

    /// A client for the public testnet.
    pub fn for_testnet() -> Self {
        Client::for_network(
            LedgerId::testnet(),
            vec![
                (AccountId::new(0, 0, 3), Ipv4Addr::new(34, 94, 106, 61)),
                (AccountId::new(0, 0, 4), Ipv4Addr::new(35, 237, 119, 55)),
                (AccountId::new(0, 0, 5), Ipv4Addr::new(35, 245, 27, 193)),
                (AccountId::new(0, 0, 6), Ipv4Addr::new(34, 83, 112, 116)),
            ],
        )
    }

    /// A client for the public previewnet.
    pub fn for_previewnet() -> Self {
        Client::for_network(
            LedgerId::previewnet(),
            vec![
                (AccountId::new(0, 0, 3), Ipv4Addr::new(35, 231, 208, 148)),
                (AccountId::new(0, 0, 4), Ipv4Addr::new(35, 199, 15, 177)),
                (AccountId::new(0, 0, 5), Ipv4Addr::new(35, 225, 201, 195)),
                (AccountId::new(0, 0, 6), Ipv4Addr::new(35, 247, 109, 135)),
            ],
        )
    }

    /// A client for an arbitrary ledger and node map, e.g. a local
    /// network or a private mirror.
    pub fn for_ledger(ledger_id: LedgerId, network: Vec<(AccountId, Endpoint)>) -> Self {
        Client {
            ledger_id,
            network,
            operator: None,
            default_max_transaction_fee: config::DEFAULT_MAX_TRANSACTION_FEE,
        }
    }

    fn for_network(ledger_id: LedgerId, nodes: Vec<(AccountId, Ipv4Addr)>) -> Self {
        let network = nodes
            .into_iter()
            .map(|(id, addr)| (id, Endpoint::new(addr, config::CANONICAL_NODE_PORT)))
            .collect();
        Client::for_ledger(ledger_id, network)
    }

    /// Sets the operator: the account that pays for transactions frozen
    /// through this client, and its key.
    pub fn set_operator(&mut self, account_id: AccountId, private_key: PrivateKey) -> &mut Self {
        self.operator = Some(Operator::new(account_id, private_key));
        self
    }

    /// Sets the default fee cap applied when a builder does not choose
    /// its own.
    pub fn set_default_max_transaction_fee(&mut self, fee: Hbar) -> &mut Self {
        self.default_max_transaction_fee = fee;
        self
    }

    /// The identity of the target ledger. Checksum computation and
    /// validation key off this value.
    pub fn ledger_id(&self) -> &LedgerId {
        &self.ledger_id
    }

    /// The node map: candidate consensus nodes and their endpoints.
    pub fn network(&self) -> &[(AccountId, Endpoint)] {
        &self.network
    }

    /// The candidate node account ids, in node-map order.
    pub fn node_account_ids(&self) -> Vec<AccountId> {
        self.network.iter().map(|(id, _)| id.clone()).collect()
    }

    /// The configured operator, if any.
    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    /// The operator's account id, if an operator is configured.
    pub fn operator_account_id(&self) -> Option<&AccountId> {
        self.operator.as_ref().map(|op| &op.account_id)
    }

    /// The default fee cap.
    pub fn default_max_transaction_fee(&self) -> Hbar {
        self.default_max_transaction_fee
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_networks_have_distinct_ledger_ids() {
        let mainnet = Client::for_mainnet();
        let testnet = Client::for_testnet();
        let previewnet = Client::for_previewnet();
        assert_ne!(mainnet.ledger_id(), testnet.ledger_id());
        assert_ne!(testnet.ledger_id(), previewnet.ledger_id());
    }

    #[test]
    fn node_maps_use_the_canonical_port() {
        for client in [
            Client::for_mainnet(),
            Client::for_testnet(),
            Client::for_previewnet(),
        ] {
            assert!(!client.network().is_empty());
            for (_, endpoint) in client.network() {
                assert_eq!(endpoint.port(), config::CANONICAL_NODE_PORT);
            }
        }
    }

    #[test]
    fn node_account_ids_preserve_map_order() {
        let client = Client::for_mainnet();
        let ids = client.node_account_ids();
        assert_eq!(ids[0], AccountId::new(0, 0, 3));
        assert_eq!(ids.len(), client.network().len());
    }

    #[test]
    fn operator_round_trips() {
        let mut client = Client::for_testnet();
        assert!(client.operator().is_none());

        let key = PrivateKey::generate();
        let public = key.public_key();
        client.set_operator(AccountId::new(0, 0, 1001), key);

        assert_eq!(
            client.operator_account_id(),
            Some(&AccountId::new(0, 0, 1001))
        );
        let operator = client.operator().unwrap();
        assert_eq!(operator.private_key().public_key(), public);
    }

    #[test]
    fn default_fee_cap_is_overridable() {
        let mut client = Client::for_testnet();
        assert_eq!(
            client.default_max_transaction_fee(),
            config::DEFAULT_MAX_TRANSACTION_FEE
        );
        client.set_default_max_transaction_fee(Hbar::from_tinybar(5));
        assert_eq!(client.default_max_transaction_fee(), Hbar::from_tinybar(5));
    }

    #[test]
    fn custom_ledger_client() {
        let client = Client::for_ledger(
            LedgerId::new(vec![0xaa]),
            vec![(
                AccountId::new(0, 0, 3),
                Endpoint::new(Ipv4Addr::new(127, 0, 0, 1), 50211),
            )],
        );
        assert_eq!(client.ledger_id().as_bytes(), &[0xaa]);
        assert_eq!(client.node_account_ids(), vec![AccountId::new(0, 0, 3)]);
    }
}
