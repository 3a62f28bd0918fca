//! # SDK Constants
//!
//! Every magic number in the SDK lives here. Checksum geometry, ledger
//! identities, node ports, default transaction parameters, and the
//! receipt polling schedule. If you find yourself hardcoding one of
//! these elsewhere, move it here first.

use std::time::Duration;

use crate::hbar::Hbar;

// ---------------------------------------------------------------------------
// Ledger Identities
// ---------------------------------------------------------------------------

/// Ledger id byte for the public mainnet.
pub const LEDGER_ID_MAINNET: u8 = 0x00;

/// Ledger id byte for the public testnet.
pub const LEDGER_ID_TESTNET: u8 = 0x01;

/// Ledger id byte for the public previewnet.
pub const LEDGER_ID_PREVIEWNET: u8 = 0x02;

// ---------------------------------------------------------------------------
// Entity Checksums
// ---------------------------------------------------------------------------

/// Length of an entity id checksum. Five base-26 letters give just under
/// 12 million distinct values, plenty to catch a copy-paste across
/// networks without bloating every printed address.
pub const CHECKSUM_LENGTH: usize = 5;

// ---------------------------------------------------------------------------
// Node Ports
// ---------------------------------------------------------------------------

/// The canonical node gRPC port.
pub const CANONICAL_NODE_PORT: u16 = 50211;

/// A retired port alias still present in old address-book records.
/// Normalized to [`CANONICAL_NODE_PORT`] on decode.
pub const LEGACY_NODE_PORT: u16 = 50111;

// ---------------------------------------------------------------------------
// Transaction Defaults
// ---------------------------------------------------------------------------

/// Default cap on the fee a transaction is willing to pay: 2 hbar.
/// Generous for every operation the SDK builds; callers with tighter
/// budgets set their own cap before freezing.
pub const DEFAULT_MAX_TRANSACTION_FEE: Hbar = Hbar::from_tinybar(200_000_000);

/// Default window, starting at the transaction id's valid-start instant,
/// during which the network will accept the transaction.
pub const DEFAULT_TRANSACTION_VALID_DURATION: Duration = Duration::from_secs(120);

/// Generated transaction ids backdate their valid-start by a few seconds
/// of random jitter so a client clock slightly ahead of the network does
/// not produce ids from the "future". Bounds in milliseconds.
pub const VALID_START_JITTER_MIN_MS: i64 = 3_000;
pub const VALID_START_JITTER_MAX_MS: i64 = 8_000;

// ---------------------------------------------------------------------------
// Receipt Polling
// ---------------------------------------------------------------------------

/// Maximum receipt queries before giving up on a submitted transaction.
pub const RECEIPT_MAX_ATTEMPTS: u32 = 10;

/// Backoff before the second receipt query; doubles per attempt.
pub const RECEIPT_INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// Cap on the per-attempt receipt backoff.
pub const RECEIPT_MAX_BACKOFF: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Transaction hashes are SHA-384: 48 bytes.
pub const TRANSACTION_HASH_LENGTH: usize = 48;
