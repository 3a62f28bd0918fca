//! Transaction body framing.
//!
//! The body is everything a signature covers: the operation payload plus
//! the framing fields (payer/valid-start id, target node, fee cap, memo,
//! validity window). Signatures never cover other signatures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::entity::AccountId;
use crate::hbar::Hbar;
use crate::transaction::id::TransactionId;
use crate::transaction::operation::Operation;

/// The signable content of a transaction.
///
/// `node_account_id` is `None` in the canonical body held by a frozen
/// transaction; signing and submission substitute each candidate node in
/// turn, so every node receives bytes naming itself and cannot replay
/// the signature through a different node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBody {
    /// Payer and valid-start instant. Always present once frozen.
    pub transaction_id: Option<TransactionId>,
    /// The node these bytes are addressed to; `None` in canonical form.
    pub node_account_id: Option<AccountId>,
    /// The most the payer is willing to be charged.
    pub max_transaction_fee: Hbar,
    /// How long past valid-start the network will accept this.
    pub transaction_valid_duration: Duration,
    /// Free-form memo recorded with the transaction.
    pub transaction_memo: String,
    /// What the transaction does.
    pub operation: Operation,
}

/// An operation wrapped for scheduling: no node targeting, no
/// transaction id. Those are supplied when the schedule fires (or when
/// the body is materialized back into a regular transaction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulableBody {
    /// Fee cap for the eventual execution.
    pub max_transaction_fee: Hbar,
    /// Memo recorded with the scheduled transaction.
    pub transaction_memo: String,
    /// The operation to execute.
    pub operation: Operation,
}

impl SchedulableBody {
    /// Wraps an operation with default framing.
    pub fn new(operation: Operation) -> Self {
        SchedulableBody {
            max_transaction_fee: config::DEFAULT_MAX_TRANSACTION_FEE,
            transaction_memo: String::new(),
            operation,
        }
    }

    /// Encodes this body in the wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::wire::encode(self)
    }

    /// Decodes a scheduled body from the wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::wire::WireError> {
        crate::wire::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::operation::TokenPauseData;

    #[test]
    fn schedulable_body_wire_roundtrip() {
        let body = SchedulableBody::new(Operation::TokenPause(TokenPauseData::new()));
        let back = SchedulableBody::from_bytes(&body.to_bytes()).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn schedulable_body_defaults() {
        let body = SchedulableBody::new(Operation::TokenPause(TokenPauseData::new()));
        assert_eq!(body.max_transaction_fee, config::DEFAULT_MAX_TRANSACTION_FEE);
        assert!(body.transaction_memo.is_empty());
    }
}
