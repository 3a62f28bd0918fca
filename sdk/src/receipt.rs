//! Transaction outcomes.
//!
//! After submission, the only truth about a transaction is its receipt:
//! the network-confirmed terminal status plus any entity ids the
//! operation created. A non-success receipt status is a *ledger
//! decision*, not a transport problem; resubmitting the same signed
//! payload cannot change it. The types here keep that distinction sharp.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{AccountId, TokenId};
use crate::transaction::TransactionId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Response codes from the network, covering both precheck answers and
/// terminal receipt statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Precheck passed; the node accepted the transaction for consensus.
    Ok,
    /// The transaction reached consensus and executed successfully.
    Success,
    /// The node is overloaded; try another node or come back later.
    Busy,
    /// No receipt exists (yet) for the queried transaction id.
    ReceiptNotFound,
    /// The network has not resolved the transaction yet.
    Unknown,
    /// A required signature is missing or does not verify.
    InvalidSignature,
    /// The payer cannot cover the transaction fee.
    InsufficientPayerBalance,
    /// The transaction named a node that did not match the one it was
    /// submitted to.
    InvalidNodeAccount,
    /// The transaction's valid-start window has not opened or has passed.
    InvalidTransactionStart,
    /// The target account has not been associated with the token.
    TokenNotAssociatedToAccount,
    /// The target account holds the token but lacks a KYC grant.
    AccountKycNotGrantedForToken,
    /// An NFT transfer names a sender that does not hold the serial.
    SenderDoesNotOwnNftSerial,
    /// The token is paused and rejects all operations.
    TokenIsPaused,
}

impl Status {
    /// Whether this status means the operation went through.
    pub fn is_success(self) -> bool {
        matches!(self, Status::Ok | Status::Success)
    }

    /// Whether polling again can change the answer. Only transient
    /// resolution states qualify; a terminal failure stays failed no
    /// matter how often it is fetched.
    pub fn is_retryable(self) -> bool {
        matches!(self, Status::Busy | Status::ReceiptNotFound | Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The network's canonical SCREAMING_SNAKE names, as they appear
        // in logs and error messages everywhere else.
        let name = match self {
            Status::Ok => "OK",
            Status::Success => "SUCCESS",
            Status::Busy => "BUSY",
            Status::ReceiptNotFound => "RECEIPT_NOT_FOUND",
            Status::Unknown => "UNKNOWN",
            Status::InvalidSignature => "INVALID_SIGNATURE",
            Status::InsufficientPayerBalance => "INSUFFICIENT_PAYER_BALANCE",
            Status::InvalidNodeAccount => "INVALID_NODE_ACCOUNT",
            Status::InvalidTransactionStart => "INVALID_TRANSACTION_START",
            Status::TokenNotAssociatedToAccount => "TOKEN_NOT_ASSOCIATED_TO_ACCOUNT",
            Status::AccountKycNotGrantedForToken => "ACCOUNT_KYC_NOT_GRANTED_FOR_TOKEN",
            Status::SenderDoesNotOwnNftSerial => "SENDER_DOES_NOT_OWN_NFT_SERIAL_NO",
            Status::TokenIsPaused => "TOKEN_IS_PAUSED",
        };
        write!(f, "{}", name)
    }
}

// ---------------------------------------------------------------------------
// TransactionReceipt
// ---------------------------------------------------------------------------

/// The network-confirmed outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Terminal status of the transaction.
    pub status: Status,
    /// The account an `AccountCreate` produced, if any.
    pub account_id: Option<AccountId>,
    /// The token a `TokenCreate` produced, if any.
    pub token_id: Option<TokenId>,
    /// The serials a `TokenMint` produced, if any.
    pub serials: Vec<u64>,
}

impl TransactionReceipt {
    /// A bare receipt carrying only a status.
    pub fn of_status(status: Status) -> Self {
        TransactionReceipt {
            status,
            account_id: None,
            token_id: None,
            serials: Vec::new(),
        }
    }

    /// Interprets the receipt: success passes the receipt through,
    /// anything else is surfaced as a [`ReceiptStatusError`] naming the
    /// transaction and the status.
    pub fn validate(&self, transaction_id: &TransactionId) -> Result<(), ReceiptStatusError> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(ReceiptStatusError {
                transaction_id: transaction_id.clone(),
                status: self.status,
            })
        }
    }
}

/// A transaction reached consensus and the ledger rejected it.
///
/// Recoverable only by building a corrected transaction; blind
/// resubmission of the same signed payload yields the same status.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("receipt for transaction {transaction_id} contains error status {status}")]
pub struct ReceiptStatusError {
    /// The transaction the receipt belongs to.
    pub transaction_id: TransactionId,
    /// The non-success terminal status.
    pub status: Status,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixture_id() -> TransactionId {
        TransactionId::with_valid_start(
            AccountId::new(0, 0, 5006),
            Utc.timestamp_opt(1_554_158_542, 0).unwrap(),
        )
    }

    #[test]
    fn success_statuses() {
        assert!(Status::Ok.is_success());
        assert!(Status::Success.is_success());
        assert!(!Status::SenderDoesNotOwnNftSerial.is_success());
    }

    #[test]
    fn retryable_statuses_are_only_transient_ones() {
        assert!(Status::Busy.is_retryable());
        assert!(Status::ReceiptNotFound.is_retryable());
        assert!(Status::Unknown.is_retryable());
        // Terminal failures must not be retried into oblivion.
        assert!(!Status::InvalidSignature.is_retryable());
        assert!(!Status::SenderDoesNotOwnNftSerial.is_retryable());
        assert!(!Status::Success.is_retryable());
    }

    #[test]
    fn display_uses_network_names() {
        assert_eq!(
            Status::SenderDoesNotOwnNftSerial.to_string(),
            "SENDER_DOES_NOT_OWN_NFT_SERIAL_NO"
        );
        assert_eq!(Status::Busy.to_string(), "BUSY");
    }

    #[test]
    fn successful_receipt_validates() {
        let receipt = TransactionReceipt::of_status(Status::Success);
        assert!(receipt.validate(&fixture_id()).is_ok());
    }

    #[test]
    fn failed_receipt_surfaces_status_error() {
        let receipt = TransactionReceipt::of_status(Status::SenderDoesNotOwnNftSerial);
        let err = receipt.validate(&fixture_id()).unwrap_err();
        assert_eq!(err.status, Status::SenderDoesNotOwnNftSerial);
        assert_eq!(err.transaction_id, fixture_id());
        assert!(err.to_string().contains("SENDER_DOES_NOT_OWN_NFT_SERIAL_NO"));
    }

    #[test]
    fn receipt_carries_created_entities() {
        let receipt = TransactionReceipt {
            status: Status::Success,
            account_id: None,
            token_id: Some(TokenId::new(0, 0, 5005)),
            serials: vec![1, 2, 3],
        };
        assert_eq!(receipt.token_id, Some(TokenId::new(0, 0, 5005)));
        assert_eq!(receipt.serials.len(), 3);
    }
}
