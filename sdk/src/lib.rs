// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # hgraph-sdk — Client SDK Core for the Hashgraph Ledger
//!
//! The client-side model for constructing, identifying, and transmitting
//! transactions against a replicated hashgraph ledger. Three components,
//! leaves first:
//!
//! - **hbar** — exact fixed-point currency values. An `i64` of tinybar
//!   under the hood; every conversion either lands on an exact integer
//!   or fails loudly. Nobody loses a tinybar to rounding.
//! - **entity** — structured identifiers (`AccountId`, `TokenId`,
//!   `NftId`) with network-bound checksums, so a mainnet address pasted
//!   into a testnet tool is caught before it costs anyone money.
//! - **transaction** — the lifecycle state machine. A mutable
//!   [`TransactionBuilder`](transaction::TransactionBuilder) freezes
//!   into an immutable
//!   [`FrozenTransaction`](transaction::FrozenTransaction) that can be
//!   signed by any number of parties, serialized, and submitted.
//!
//! Supporting cast: `crypto` wraps Ed25519 signing, `wire` owns the
//! binary schema, `client` names a target ledger and its defaults,
//! `execute`/`receipt` drive submission and interpret outcomes.
//!
//! ## Example
//!
//! ```
//! use hgraph_sdk::entity::{AccountId, TokenId};
//! use hgraph_sdk::hbar::Hbar;
//! use hgraph_sdk::transaction::{TransactionBuilder, TransactionId};
//! use hgraph_sdk::crypto::PrivateKey;
//! use chrono::{TimeZone, Utc};
//!
//! let valid_start = Utc.timestamp_opt(1_554_158_542, 0).unwrap();
//! let mut tx = TransactionBuilder::token_pause(TokenId::new(4, 2, 0))
//!     .set_node_account_ids(vec![AccountId::new(0, 0, 3)])
//!     .set_transaction_id(TransactionId::with_valid_start(
//!         AccountId::new(0, 0, 5006),
//!         valid_start,
//!     ))
//!     .set_max_transaction_fee(Hbar::new(1).unwrap())
//!     .freeze()
//!     .unwrap();
//!
//! tx.sign(&PrivateKey::generate());
//! let bytes = tx.to_bytes();
//! assert_eq!(
//!     hgraph_sdk::transaction::FrozenTransaction::from_bytes(&bytes)
//!         .unwrap()
//!         .to_string(),
//!     tx.to_string(),
//! );
//! ```
//!
//! ## Design Notes
//!
//! - Correctness over convenience: fractional tinybar, checksum
//!   mismatches, and incomplete transactions are errors, not warnings.
//! - The frozen state is a separate *type*, not a flag. If it compiles,
//!   you did not mutate a frozen transaction.
//! - The network is a collaborator behind a trait; everything in this
//!   crate is deterministic and testable without a socket.

pub mod client;
pub mod config;
pub mod crypto;
pub mod entity;
pub mod execute;
pub mod hbar;
pub mod receipt;
pub mod transaction;
pub mod wire;

pub use client::{Client, Operator};
pub use crypto::{PrivateKey, PublicKey, Signature};
pub use entity::{AccountId, Endpoint, EntityIdError, LedgerId, NftId, TokenId};
pub use execute::{ChannelError, ExecuteError, LedgerChannel, ReceiptError, TransactionResponse};
pub use hbar::{Hbar, HbarRangeError, HbarUnit};
pub use receipt::{ReceiptStatusError, Status, TransactionReceipt};
pub use transaction::{FrozenTransaction, TransactionBuilder, TransactionId};
