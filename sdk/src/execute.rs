//! Submission and receipt retrieval.
//!
//! The network itself is an external collaborator behind the
//! [`LedgerChannel`] trait: one submit exchange per node attempt, one
//! receipt query per poll. Everything stateful (connection pools, TLS,
//! address books) lives behind the trait; this module only sequences the
//! calls and interprets the answers.
//!
//! These are the only suspend points in the SDK. Identifiers, values,
//! and frozen transactions never block; only talking to the ledger does.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config;
use crate::entity::AccountId;
use crate::receipt::{ReceiptStatusError, Status, TransactionReceipt};
use crate::transaction::{FrozenTransaction, TransactionId};

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Transport-level failure talking to a node. Distinct from every
/// ledger-level status: the network never saw (or never answered for)
/// the request.
#[derive(Debug, Error)]
#[error("channel error talking to the network: {message}")]
pub struct ChannelError {
    /// Human-readable description from the transport.
    pub message: String,
}

impl ChannelError {
    pub fn new(message: impl Into<String>) -> Self {
        ChannelError {
            message: message.into(),
        }
    }
}

/// The submission / receipt collaborator.
///
/// `submit` performs a single request/response exchange with one node
/// and returns the node's precheck status. `receipt` fetches the current
/// receipt for a transaction id; before consensus resolves it answers
/// with a transient status ([`Status::ReceiptNotFound`] or
/// [`Status::Unknown`]).
///
/// Implementations own their timeouts and transport retries. This crate
/// never retries a transport call; it only polls `receipt` while the
/// answer is transient.
#[async_trait]
pub trait LedgerChannel: Send + Sync {
    /// Submits transaction bytes to one node.
    async fn submit(
        &self,
        node_account_id: &AccountId,
        transaction_bytes: &[u8],
    ) -> Result<Status, ChannelError>;

    /// Fetches the current receipt for a transaction.
    async fn receipt(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<TransactionReceipt, ChannelError>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from submitting a transaction.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A node answered the precheck with a terminal failure.
    #[error("precheck for transaction {transaction_id} failed with status {status}")]
    Precheck {
        /// The transaction that was rejected.
        transaction_id: TransactionId,
        /// The node's answer.
        status: Status,
    },

    /// Every candidate node was either unreachable or busy.
    #[error("all {attempted} candidate nodes were unreachable or busy")]
    NodesExhausted {
        /// How many nodes were tried.
        attempted: usize,
    },
}

/// Errors from retrieving a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The transport failed before an answer arrived.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The ledger resolved the transaction and rejected it.
    #[error(transparent)]
    ReceiptStatus(#[from] ReceiptStatusError),

    /// The receipt stayed transient through the whole polling budget.
    #[error("no terminal receipt after {attempts} attempts")]
    TimedOut {
        /// How many queries were made.
        attempts: u32,
    },
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

impl FrozenTransaction {
    /// Submits this transaction through the channel.
    ///
    /// Candidate nodes are tried in order, one exchange each. A busy or
    /// unreachable node rotates to the next; a terminal precheck failure
    /// aborts immediately (another node would reject it the same way).
    pub async fn execute<C>(&self, channel: &C) -> Result<TransactionResponse, ExecuteError>
    where
        C: LedgerChannel + ?Sized,
    {
        let transaction_id = self.transaction_id().clone();
        let bytes = self.to_bytes();

        for node in self.node_account_ids() {
            match channel.submit(node, &bytes).await {
                Ok(status) if status.is_success() => {
                    debug!(node = %node, transaction_id = %transaction_id, "transaction submitted");
                    return Ok(TransactionResponse {
                        node_account_id: node.clone(),
                        transaction_id,
                        transaction_hash: self.transaction_hash(),
                    });
                }
                Ok(status) if status.is_retryable() => {
                    warn!(node = %node, %status, "node unavailable, rotating");
                }
                Ok(status) => {
                    return Err(ExecuteError::Precheck {
                        transaction_id,
                        status,
                    });
                }
                Err(err) => {
                    warn!(node = %node, error = %err, "transport failure, rotating");
                }
            }
        }

        Err(ExecuteError::NodesExhausted {
            attempted: self.node_account_ids().len(),
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionResponse
// ---------------------------------------------------------------------------

/// Acknowledgment that one node accepted a transaction for consensus.
///
/// Acceptance is not success: the outcome only exists once
/// [`get_receipt`](Self::get_receipt) returns.
#[derive(Debug, Clone)]
pub struct TransactionResponse {
    /// The node that accepted the submission.
    pub node_account_id: AccountId,
    /// The id to query receipts and records by.
    pub transaction_id: TransactionId,
    /// SHA-384 hash of the submitted bytes.
    pub transaction_hash: Vec<u8>,
}

impl TransactionResponse {
    /// Polls for the receipt until the network resolves the transaction,
    /// then interprets it.
    ///
    /// Transient answers are retried with doubling backoff up to the
    /// configured budget. A terminal non-success receipt is returned as
    /// [`ReceiptError::ReceiptStatus`]; it is a ledger decision, and
    /// callers must not confuse it with the transport failures in
    /// [`ReceiptError::Channel`].
    pub async fn get_receipt<C>(&self, channel: &C) -> Result<TransactionReceipt, ReceiptError>
    where
        C: LedgerChannel + ?Sized,
    {
        let mut backoff = config::RECEIPT_INITIAL_BACKOFF;

        for attempt in 1..=config::RECEIPT_MAX_ATTEMPTS {
            let receipt = channel.receipt(&self.transaction_id).await?;

            if receipt.status.is_retryable() {
                debug!(
                    transaction_id = %self.transaction_id,
                    status = %receipt.status,
                    attempt,
                    "receipt not ready"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(config::RECEIPT_MAX_BACKOFF);
                continue;
            }

            receipt.validate(&self.transaction_id)?;
            return Ok(receipt);
        }

        Err(ReceiptError::TimedOut {
            attempts: config::RECEIPT_MAX_ATTEMPTS,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TokenId;
    use crate::hbar::Hbar;
    use crate::transaction::TransactionBuilder;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    /// A scripted in-memory ledger: per-node precheck answers and a
    /// sequence of receipt answers consumed one per poll.
    struct ScriptedLedger {
        prechecks: Vec<(AccountId, Result<Status, ()>)>,
        receipts: Mutex<Vec<TransactionReceipt>>,
        submissions: Mutex<Vec<AccountId>>,
    }

    impl ScriptedLedger {
        fn new(
            prechecks: Vec<(AccountId, Result<Status, ()>)>,
            receipts: Vec<TransactionReceipt>,
        ) -> Self {
            ScriptedLedger {
                prechecks,
                receipts: Mutex::new(receipts),
                submissions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LedgerChannel for ScriptedLedger {
        async fn submit(
            &self,
            node_account_id: &AccountId,
            _transaction_bytes: &[u8],
        ) -> Result<Status, ChannelError> {
            self.submissions.lock().unwrap().push(node_account_id.clone());
            self.prechecks
                .iter()
                .find(|(node, _)| node == node_account_id)
                .map(|(_, answer)| (*answer).map_err(|_| ChannelError::new("connection refused")))
                .unwrap_or(Ok(Status::Ok))
        }

        async fn receipt(
            &self,
            _transaction_id: &TransactionId,
        ) -> Result<TransactionReceipt, ChannelError> {
            let mut receipts = self.receipts.lock().unwrap();
            if receipts.is_empty() {
                return Ok(TransactionReceipt::of_status(Status::ReceiptNotFound));
            }
            Ok(receipts.remove(0))
        }
    }

    fn signed_fixture() -> FrozenTransaction {
        let mut tx = TransactionBuilder::token_pause(TokenId::new(4, 2, 0))
            .set_node_account_ids(vec![AccountId::new(0, 0, 3), AccountId::new(0, 0, 4)])
            .set_transaction_id(crate::transaction::TransactionId::with_valid_start(
                AccountId::new(0, 0, 5006),
                Utc.timestamp_opt(1_554_158_542, 0).unwrap(),
            ))
            .set_max_transaction_fee(Hbar::new(1).unwrap())
            .freeze()
            .unwrap();
        tx.sign(&crate::crypto::PrivateKey::generate());
        tx
    }

    #[tokio::test]
    async fn execute_returns_the_accepting_node() {
        let ledger = ScriptedLedger::new(
            vec![(AccountId::new(0, 0, 3), Ok(Status::Ok))],
            vec![],
        );
        let tx = signed_fixture();
        let response = tx.execute(&ledger).await.unwrap();
        assert_eq!(response.node_account_id, AccountId::new(0, 0, 3));
        assert_eq!(response.transaction_id, *tx.transaction_id());
        assert_eq!(response.transaction_hash, tx.transaction_hash());
    }

    #[tokio::test]
    async fn execute_rotates_past_busy_and_dead_nodes() {
        let ledger = ScriptedLedger::new(
            vec![
                (AccountId::new(0, 0, 3), Err(())),
                (AccountId::new(0, 0, 4), Ok(Status::Ok)),
            ],
            vec![],
        );
        let response = signed_fixture().execute(&ledger).await.unwrap();
        assert_eq!(response.node_account_id, AccountId::new(0, 0, 4));
        assert_eq!(
            *ledger.submissions.lock().unwrap(),
            vec![AccountId::new(0, 0, 3), AccountId::new(0, 0, 4)]
        );
    }

    #[tokio::test]
    async fn execute_stops_on_terminal_precheck() {
        let ledger = ScriptedLedger::new(
            vec![(AccountId::new(0, 0, 3), Ok(Status::InsufficientPayerBalance))],
            vec![],
        );
        let err = signed_fixture().execute(&ledger).await.unwrap_err();
        match err {
            ExecuteError::Precheck { status, .. } => {
                assert_eq!(status, Status::InsufficientPayerBalance);
            }
            other => panic!("expected Precheck, got {:?}", other),
        }
        // No rotation after a terminal answer.
        assert_eq!(ledger.submissions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn execute_exhausts_unreachable_network() {
        let ledger = ScriptedLedger::new(
            vec![
                (AccountId::new(0, 0, 3), Err(())),
                (AccountId::new(0, 0, 4), Ok(Status::Busy)),
            ],
            vec![],
        );
        let err = signed_fixture().execute(&ledger).await.unwrap_err();
        assert!(matches!(err, ExecuteError::NodesExhausted { attempted: 2 }));
    }

    #[tokio::test(start_paused = true)]
    async fn get_receipt_polls_through_transient_states() {
        let ledger = ScriptedLedger::new(
            vec![],
            vec![
                TransactionReceipt::of_status(Status::ReceiptNotFound),
                TransactionReceipt::of_status(Status::Unknown),
                TransactionReceipt::of_status(Status::Success),
            ],
        );
        let response = signed_fixture().execute(&ledger).await.unwrap();
        let receipt = response.get_receipt(&ledger).await.unwrap();
        assert_eq!(receipt.status, Status::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn get_receipt_surfaces_ledger_rejection_as_status_error() {
        let ledger = ScriptedLedger::new(
            vec![],
            vec![TransactionReceipt::of_status(
                Status::SenderDoesNotOwnNftSerial,
            )],
        );
        let response = signed_fixture().execute(&ledger).await.unwrap();
        let err = response.get_receipt(&ledger).await.unwrap_err();
        match err {
            ReceiptError::ReceiptStatus(status_err) => {
                assert_eq!(status_err.status, Status::SenderDoesNotOwnNftSerial);
            }
            other => panic!("expected ReceiptStatus, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn get_receipt_gives_up_after_the_polling_budget() {
        // The scripted ledger answers ReceiptNotFound forever.
        let ledger = ScriptedLedger::new(vec![], vec![]);
        let response = signed_fixture().execute(&ledger).await.unwrap();
        let err = response.get_receipt(&ledger).await.unwrap_err();
        assert!(matches!(err, ReceiptError::TimedOut { .. }));
    }
}
