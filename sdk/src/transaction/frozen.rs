//! Frozen transactions.
//!
//! A [`FrozenTransaction`] is the immutable half of the lifecycle. It
//! exposes signing, serialization, and submission, and nothing that
//! could change the signed content. Getting one back into a mutable
//! shape means building a new transaction; there is no thaw.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha384};
use tracing::debug;

use crate::crypto::{PrivateKey, PublicKey, Signature};
use crate::entity::AccountId;
use crate::transaction::body::TransactionBody;
use crate::transaction::id::TransactionId;
use crate::transaction::operation::OperationKind;
use crate::wire::{self, WireError};

// ---------------------------------------------------------------------------
// Signature bookkeeping
// ---------------------------------------------------------------------------

/// One signer's signature over one node's body bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignaturePair {
    /// The signer's public key.
    pub public_key: PublicKey,
    /// The signature over the node-specific body bytes.
    pub signature: Signature,
}

/// The signatures collected for one candidate node.
///
/// Kept as a vector in node-list order (not a map) so the wire encoding
/// is deterministic and re-encoding a decoded transaction reproduces the
/// input bytes exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedNode {
    /// The node these signatures are addressed to.
    pub node_account_id: AccountId,
    /// One entry per signer, in signing order.
    pub signature_pairs: Vec<SignaturePair>,
}

// ---------------------------------------------------------------------------
// FrozenTransaction
// ---------------------------------------------------------------------------

/// A transaction whose structural fields are locked.
///
/// Produced by `TransactionBuilder::freeze`, or decoded from bytes a
/// previous freeze produced. Signing is repeatable and idempotent per
/// (node, key) pair; serialization and submission can happen any number
/// of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenTransaction {
    body: TransactionBody,
    node_account_ids: Vec<AccountId>,
    signatures: Vec<SignedNode>,
}

impl FrozenTransaction {
    /// Called by `freeze()`; the body's transaction id is already
    /// validated present and the node list non-empty.
    pub(crate) fn from_parts(body: TransactionBody, node_account_ids: Vec<AccountId>) -> Self {
        FrozenTransaction {
            body,
            node_account_ids,
            signatures: Vec::new(),
        }
    }

    /// The signable content.
    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// The candidate nodes this transaction may be submitted to.
    pub fn node_account_ids(&self) -> &[AccountId] {
        &self.node_account_ids
    }

    /// The transaction id.
    pub fn transaction_id(&self) -> &TransactionId {
        // Invariant held by both construction paths: freeze() validates
        // presence, from_bytes() rejects bodies without an id.
        self.body
            .transaction_id
            .as_ref()
            .expect("a frozen transaction always carries a transaction id")
    }

    /// The operation kind this transaction performs.
    pub fn kind(&self) -> OperationKind {
        self.body.operation.kind()
    }

    /// The signatures collected so far.
    pub fn signatures(&self) -> &[SignedNode] {
        &self.signatures
    }

    /// Whether the given key has already signed for every node.
    pub fn is_signed_by(&self, public_key: &PublicKey) -> bool {
        !self.signatures.is_empty()
            && self.node_account_ids.iter().all(|node| {
                self.signatures
                    .iter()
                    .find(|s| &s.node_account_id == node)
                    .is_some_and(|s| {
                        s.signature_pairs
                            .iter()
                            .any(|p| &p.public_key == public_key)
                    })
            })
    }

    /// The body bytes a signature for `node` covers: the canonical body
    /// with that node's account id substituted in. Each node receives
    /// bytes naming itself, so a signature cannot be replayed through a
    /// different node.
    pub fn signable_bytes(&self, node_account_id: &AccountId) -> Vec<u8> {
        let mut body = self.body.clone();
        body.node_account_id = Some(node_account_id.clone());
        wire::encode(&body)
    }

    /// Signs with a private key held in memory.
    pub fn sign(&mut self, private_key: &PrivateKey) -> &mut Self {
        let public_key = private_key.public_key();
        self.sign_with(public_key, |message| private_key.sign(message))
    }

    /// Signs with an external signer capability.
    ///
    /// The signer never sees the private key handling; it is handed the
    /// node-specific body bytes and returns a signature (a hardware
    /// wallet or remote service fits this shape). One signature is
    /// recorded per (node, key) pair; signing again with the same key is
    /// a no-op rather than a duplicate entry.
    pub fn sign_with<F>(&mut self, public_key: PublicKey, signer: F) -> &mut Self
    where
        F: Fn(&[u8]) -> Signature,
    {
        for node in self.node_account_ids.clone() {
            let already_signed = self
                .signatures
                .iter()
                .find(|s| s.node_account_id == node)
                .is_some_and(|s| s.signature_pairs.iter().any(|p| p.public_key == public_key));
            if already_signed {
                continue;
            }

            let message = self.signable_bytes(&node);
            let pair = SignaturePair {
                public_key: public_key.clone(),
                signature: signer(&message),
            };
            match self
                .signatures
                .iter_mut()
                .find(|s| s.node_account_id == node)
            {
                Some(entry) => entry.signature_pairs.push(pair),
                None => self.signatures.push(SignedNode {
                    node_account_id: node,
                    signature_pairs: vec![pair],
                }),
            }
        }

        debug!(key = %public_key, nodes = self.node_account_ids.len(), "transaction signed");
        self
    }

    /// Serializes the full transaction: body, node list, and whatever
    /// signatures have been collected (possibly none; an unsigned frozen
    /// transaction still serializes).
    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode(self)
    }

    /// Decodes a transaction previously produced by
    /// [`to_bytes`](Self::to_bytes).
    ///
    /// The concrete operation kind is recovered from the encoded
    /// operation variant; inspect it with [`kind`](Self::kind). Inputs
    /// that decode structurally but violate the frozen-state invariants
    /// are rejected: round-trip laws only make sense for values this
    /// type could actually have produced.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let decoded: FrozenTransaction = wire::decode(bytes)?;
        if decoded.body.transaction_id.is_none() {
            return Err(WireError::Invalid(
                "frozen transaction has no transaction id".to_string(),
            ));
        }
        if decoded.node_account_ids.is_empty() {
            return Err(WireError::Invalid(
                "frozen transaction has no node account ids".to_string(),
            ));
        }
        if decoded.body.node_account_id.is_some() {
            return Err(WireError::Invalid(
                "canonical body must not name a node".to_string(),
            ));
        }
        Ok(decoded)
    }

    /// SHA-384 digest of the serialized transaction. This is the hash
    /// the network indexes submitted transactions by.
    pub fn transaction_hash(&self) -> Vec<u8> {
        Sha384::digest(self.to_bytes()).to_vec()
    }
}

impl fmt::Display for FrozenTransaction {
    /// Canonical JSON rendering of the whole transaction.
    ///
    /// Deterministic for a given value, which makes the string form a
    /// usable structural-equality proxy in tests. Not a wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
