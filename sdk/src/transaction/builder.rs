//! Transaction construction.
//!
//! [`TransactionBuilder`] is the mutable half of the lifecycle. Fields
//! can be set in any order; `freeze()` checks that the structural fields
//! are resolvable and *consumes* the builder into a
//! [`FrozenTransaction`]. After that point no setter exists to call:
//! immutability is enforced by the type system, not by a runtime flag,
//! so "mutate after freeze" and "sign before freeze" are compile errors
//! rather than panics.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::client::Client;
use crate::config;
use crate::entity::AccountId;
use crate::hbar::Hbar;
use crate::transaction::body::{SchedulableBody, TransactionBody};
use crate::transaction::frozen::FrozenTransaction;
use crate::transaction::id::TransactionId;
use crate::transaction::operation::{
    AccountCreateData, Operation, TokenAssociateData, TokenCreateData, TokenGrantKycData,
    TokenMintData, TokenPauseData, TokenWipeData, TransferData,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from freezing an incomplete builder.
///
/// These are programmer errors, not network conditions: retrying the
/// same call cannot succeed, the missing field has to be supplied.
#[derive(Debug, Error)]
pub enum FreezeError {
    /// No candidate nodes were set and no client supplied any.
    #[error("cannot freeze: no node account ids were set")]
    MissingNodeAccountIds,

    /// No transaction id was set and no operator was configured to
    /// derive one from.
    #[error("cannot freeze: no transaction id was set and no operator is configured")]
    MissingTransactionId,
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// A transaction under construction.
///
/// # Examples
///
/// ```
/// use hgraph_sdk::entity::{AccountId, TokenId};
/// use hgraph_sdk::hbar::Hbar;
/// use hgraph_sdk::transaction::{TransactionBuilder, TransactionId};
/// use chrono::{TimeZone, Utc};
///
/// let valid_start = Utc.timestamp_opt(1_554_158_542, 0).unwrap();
/// let frozen = TransactionBuilder::token_pause(TokenId::new(4, 2, 0))
///     .set_node_account_ids(vec![AccountId::new(0, 0, 5005), AccountId::new(0, 0, 5006)])
///     .set_transaction_id(TransactionId::with_valid_start(
///         AccountId::new(0, 0, 5006),
///         valid_start,
///     ))
///     .set_max_transaction_fee(Hbar::new(1).unwrap())
///     .freeze()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    operation: Operation,
    node_account_ids: Vec<AccountId>,
    transaction_id: Option<TransactionId>,
    max_transaction_fee: Option<Hbar>,
    transaction_memo: String,
    transaction_valid_duration: Duration,
}

impl TransactionBuilder {
    /// A builder around an operation payload.
    pub fn new(operation: Operation) -> Self {
        TransactionBuilder {
            operation,
            node_account_ids: Vec::new(),
            transaction_id: None,
            max_transaction_fee: None,
            transaction_memo: String::new(),
            transaction_valid_duration: config::DEFAULT_TRANSACTION_VALID_DURATION,
        }
    }

    // Per-kind conveniences, so common call sites read as "what" instead
    // of "which enum variant".

    /// A transfer of hbar legs and/or NFT serials.
    pub fn transfer(data: TransferData) -> Self {
        Self::new(Operation::Transfer(data))
    }

    /// An account creation.
    pub fn account_create(data: AccountCreateData) -> Self {
        Self::new(Operation::AccountCreate(data))
    }

    /// A token creation.
    pub fn token_create(data: TokenCreateData) -> Self {
        Self::new(Operation::TokenCreate(data))
    }

    /// A token mint.
    pub fn token_mint(data: TokenMintData) -> Self {
        Self::new(Operation::TokenMint(data))
    }

    /// A token association.
    pub fn token_associate(data: TokenAssociateData) -> Self {
        Self::new(Operation::TokenAssociate(data))
    }

    /// A KYC grant.
    pub fn token_grant_kyc(data: TokenGrantKycData) -> Self {
        Self::new(Operation::TokenGrantKyc(data))
    }

    /// A token wipe.
    pub fn token_wipe(data: TokenWipeData) -> Self {
        Self::new(Operation::TokenWipe(data))
    }

    /// A pause of the given token.
    pub fn token_pause(token_id: crate::entity::TokenId) -> Self {
        Self::new(Operation::TokenPause(TokenPauseData::new().with_token_id(token_id)))
    }

    /// Reconstructs a builder from a decoded transaction body.
    ///
    /// The result is in the building state: framing fields extracted
    /// from the body can still be overridden before freezing.
    pub fn from_wire_body(body: TransactionBody) -> Self {
        TransactionBuilder {
            operation: body.operation,
            node_account_ids: body.node_account_id.into_iter().collect(),
            transaction_id: body.transaction_id,
            max_transaction_fee: Some(body.max_transaction_fee),
            transaction_memo: body.transaction_memo,
            transaction_valid_duration: body.transaction_valid_duration,
        }
    }

    /// Materializes a previously scheduled operation into a regular
    /// builder.
    ///
    /// Node account ids and the transaction id are deliberately left
    /// unset; the caller supplies both (directly or via
    /// [`freeze_with`](Self::freeze_with)) before freezing.
    pub fn from_scheduled(body: SchedulableBody) -> Self {
        TransactionBuilder {
            operation: body.operation,
            node_account_ids: Vec::new(),
            transaction_id: None,
            max_transaction_fee: Some(body.max_transaction_fee),
            transaction_memo: body.transaction_memo,
            transaction_valid_duration: config::DEFAULT_TRANSACTION_VALID_DURATION,
        }
    }

    // -- mutators (building state only; freeze() consumes the builder) --

    /// Sets the candidate nodes the transaction may be submitted to.
    pub fn set_node_account_ids(mut self, node_account_ids: Vec<AccountId>) -> Self {
        self.node_account_ids = node_account_ids;
        self
    }

    /// Sets the transaction id (payer + valid-start).
    pub fn set_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    /// Sets the fee cap.
    pub fn set_max_transaction_fee(mut self, fee: Hbar) -> Self {
        self.max_transaction_fee = Some(fee);
        self
    }

    /// Sets the memo recorded with the transaction.
    pub fn set_transaction_memo(mut self, memo: impl Into<String>) -> Self {
        self.transaction_memo = memo.into();
        self
    }

    /// Sets the validity window length.
    pub fn set_transaction_valid_duration(mut self, duration: Duration) -> Self {
        self.transaction_valid_duration = duration;
        self
    }

    /// Replaces the operation payload.
    pub fn set_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    // -- getters --

    /// The operation payload.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// The candidate nodes set so far.
    pub fn node_account_ids(&self) -> &[AccountId] {
        &self.node_account_ids
    }

    /// The transaction id, if one was set.
    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// The fee cap, if one was set.
    pub fn max_transaction_fee(&self) -> Option<Hbar> {
        self.max_transaction_fee
    }

    /// The memo.
    pub fn transaction_memo(&self) -> &str {
        &self.transaction_memo
    }

    // -- freezing --

    /// Locks the structural fields, consuming the builder.
    ///
    /// Requires node account ids and a transaction id to already be set;
    /// use [`freeze_with`](Self::freeze_with) to derive them from a
    /// client instead.
    pub fn freeze(self) -> Result<FrozenTransaction, FreezeError> {
        if self.node_account_ids.is_empty() {
            return Err(FreezeError::MissingNodeAccountIds);
        }
        let transaction_id = self
            .transaction_id
            .ok_or(FreezeError::MissingTransactionId)?;

        let body = TransactionBody {
            transaction_id: Some(transaction_id),
            node_account_id: None,
            max_transaction_fee: self
                .max_transaction_fee
                .unwrap_or(config::DEFAULT_MAX_TRANSACTION_FEE),
            transaction_valid_duration: self.transaction_valid_duration,
            transaction_memo: self.transaction_memo,
            operation: self.operation,
        };

        debug!(
            kind = %body.operation.kind(),
            nodes = self.node_account_ids.len(),
            "transaction frozen"
        );

        Ok(FrozenTransaction::from_parts(body, self.node_account_ids))
    }

    /// Like [`freeze`](Self::freeze), filling unset structural fields
    /// from the client: candidate nodes from its network map, a
    /// generated transaction id from its operator, and its default fee
    /// cap.
    pub fn freeze_with(mut self, client: &Client) -> Result<FrozenTransaction, FreezeError> {
        if self.node_account_ids.is_empty() {
            self.node_account_ids = client.node_account_ids();
        }
        if self.transaction_id.is_none() {
            self.transaction_id = client
                .operator_account_id()
                .map(|payer| TransactionId::generate(payer.clone()));
        }
        if self.max_transaction_fee.is_none() {
            self.max_transaction_fee = Some(client.default_max_transaction_fee());
        }
        self.freeze()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
