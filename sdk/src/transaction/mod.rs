//! # Transaction Lifecycle
//!
//! Construction, freezing, signing, serialization, and submission of
//! ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! id.rs        — TransactionId (payer + valid-start, nonce, scheduled flag)
//! operation.rs — Operation: the closed sum over operation kinds and payloads
//! body.rs      — TransactionBody / SchedulableBody framing
//! builder.rs   — TransactionBuilder: the mutable building state
//! frozen.rs    — FrozenTransaction: signing, wire round-trip, hashing
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — assemble operation payload and framing fields on a
//!    [`TransactionBuilder`].
//! 2. **Freeze** — `freeze()` / `freeze_with(&client)` validates the
//!    structural fields and consumes the builder into a
//!    [`FrozenTransaction`]. From here the content cannot change; the
//!    frozen type simply has no mutators, so the compiler enforces what
//!    would otherwise be a runtime state check.
//! 3. **Sign** — repeatable, idempotent per (node, key) pair. Signatures
//!    cover node-specific body bytes, never other signatures.
//! 4. **Serialize / submit** — `to_bytes()` any number of times;
//!    `execute(&channel)` submits and yields the response to poll a
//!    receipt from.
//!
//! Transactions are single-caller objects: nothing here locks, and
//! sharing one instance across threads mid-mutation is on the caller.

pub mod body;
pub mod builder;
pub mod frozen;
pub mod id;
pub mod operation;

pub use body::{SchedulableBody, TransactionBody};
pub use builder::{FreezeError, TransactionBuilder};
pub use frozen::{FrozenTransaction, SignaturePair, SignedNode};
pub use id::{TransactionId, TransactionIdError};
pub use operation::{
    AccountCreateData, HbarTransfer, NftTransfer, Operation, OperationKind, TokenAssociateData,
    TokenCreateData, TokenGrantKycData, TokenMintData, TokenPauseData, TokenType, TokenWipeData,
    TransferData,
};
