//! Operation payloads.
//!
//! Every transaction performs exactly one operation, drawn from a closed
//! set. [`Operation`] is the tagged union over those kinds; decoding a
//! transaction from the wire dispatches on which variant is present,
//! which is how `FrozenTransaction::from_bytes` recovers the concrete
//! kind without any out-of-band type information.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::entity::{AccountId, NftId, TokenId};
use crate::hbar::Hbar;

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// One leg of an hbar transfer. Debits are negative amounts, credits
/// positive; a balanced transfer list sums to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HbarTransfer {
    /// The account debited or credited.
    pub account_id: AccountId,
    /// Signed amount: negative leaves the account, positive arrives.
    pub amount: Hbar,
}

/// Movement of one NFT serial between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftTransfer {
    /// The serial being moved.
    pub nft_id: NftId,
    /// The account the serial leaves.
    pub sender_account_id: AccountId,
    /// The account the serial arrives at.
    pub receiver_account_id: AccountId,
}

/// Payload of a transfer operation: any mix of hbar legs and NFT moves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransferData {
    /// Hbar debits and credits.
    pub hbar_transfers: Vec<HbarTransfer>,
    /// NFT serial movements.
    pub nft_transfers: Vec<NftTransfer>,
}

impl TransferData {
    /// An empty transfer, to be filled with `add_*` calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an hbar debit or credit.
    pub fn add_hbar_transfer(mut self, account_id: AccountId, amount: Hbar) -> Self {
        self.hbar_transfers.push(HbarTransfer { account_id, amount });
        self
    }

    /// Adds an NFT serial movement.
    pub fn add_nft_transfer(
        mut self,
        nft_id: NftId,
        sender_account_id: AccountId,
        receiver_account_id: AccountId,
    ) -> Self {
        self.nft_transfers.push(NftTransfer {
            nft_id,
            sender_account_id,
            receiver_account_id,
        });
        self
    }
}

// ---------------------------------------------------------------------------
// Account operations
// ---------------------------------------------------------------------------

/// Payload of an account creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountCreateData {
    /// The key that will control the new account.
    pub key: Option<PublicKey>,
    /// Starting balance transferred from the payer.
    pub initial_balance: Hbar,
}

impl AccountCreateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the controlling key.
    pub fn with_key(mut self, key: PublicKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Sets the starting balance.
    pub fn with_initial_balance(mut self, balance: Hbar) -> Self {
        self.initial_balance = balance;
        self
    }
}

// ---------------------------------------------------------------------------
// Token operations
// ---------------------------------------------------------------------------

/// Whether a token's units are interchangeable or individually tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    /// Interchangeable units with a common balance.
    FungibleCommon,
    /// Individually tracked serials.
    NonFungibleUnique,
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::FungibleCommon
    }
}

/// Payload of a token creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenCreateData {
    /// Human-readable token name.
    pub name: String,
    /// Short ticker symbol.
    pub symbol: String,
    /// Fungible or non-fungible.
    pub token_type: TokenType,
    /// The account that holds the initial supply and treasury rights.
    pub treasury_account_id: Option<AccountId>,
    /// Units minted at creation. Must be zero for non-fungible tokens;
    /// their serials are minted afterwards.
    pub initial_supply: u64,
}

impl TokenCreateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn with_treasury_account_id(mut self, account_id: AccountId) -> Self {
        self.treasury_account_id = Some(account_id);
        self
    }

    pub fn with_initial_supply(mut self, supply: u64) -> Self {
        self.initial_supply = supply;
        self
    }
}

/// Payload of a mint: new fungible units, or new NFT serials (one per
/// metadata blob).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenMintData {
    /// The token being minted.
    pub token_id: Option<TokenId>,
    /// Fungible units to mint; zero for NFT mints.
    pub amount: u64,
    /// One metadata blob per NFT serial to mint; empty for fungible.
    pub metadata: Vec<Vec<u8>>,
}

impl TokenMintData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    pub fn add_metadata(mut self, blob: Vec<u8>) -> Self {
        self.metadata.push(blob);
        self
    }
}

/// Payload of an association: lets an account hold the listed tokens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenAssociateData {
    /// The account being associated.
    pub account_id: Option<AccountId>,
    /// Tokens the account will be able to hold.
    pub token_ids: Vec<TokenId>,
}

impl TokenAssociateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn add_token_id(mut self, token_id: TokenId) -> Self {
        self.token_ids.push(token_id);
        self
    }
}

/// Payload of a KYC grant for one (account, token) pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenGrantKycData {
    /// The account receiving the grant.
    pub account_id: Option<AccountId>,
    /// The token the grant applies to.
    pub token_id: Option<TokenId>,
}

impl TokenGrantKycData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }
}

/// Payload of a wipe: removes units or serials from one account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenWipeData {
    /// The token being wiped.
    pub token_id: Option<TokenId>,
    /// The account the units or serials are removed from.
    pub account_id: Option<AccountId>,
    /// Fungible units to wipe; zero for NFT wipes.
    pub amount: u64,
    /// NFT serials to wipe; empty for fungible wipes.
    pub serials: Vec<u64>,
}

impl TokenWipeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_serials(mut self, serials: Vec<u64>) -> Self {
        self.serials = serials;
        self
    }
}

/// Payload of a pause: halts all activity on a token until unpaused.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenPauseData {
    /// The token being paused.
    pub token_id: Option<TokenId>,
}

impl TokenPauseData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_id(mut self, token_id: TokenId) -> Self {
        self.token_id = Some(token_id);
        self
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The closed set of operations a transaction can perform, each variant
/// carrying its payload. The wire encoding tags the variant, so a
/// decoded transaction knows its concrete kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Transfer(TransferData),
    AccountCreate(AccountCreateData),
    TokenCreate(TokenCreateData),
    TokenMint(TokenMintData),
    TokenAssociate(TokenAssociateData),
    TokenGrantKyc(TokenGrantKycData),
    TokenWipe(TokenWipeData),
    TokenPause(TokenPauseData),
}

impl Operation {
    /// The kind discriminant, without the payload.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Transfer(_) => OperationKind::Transfer,
            Operation::AccountCreate(_) => OperationKind::AccountCreate,
            Operation::TokenCreate(_) => OperationKind::TokenCreate,
            Operation::TokenMint(_) => OperationKind::TokenMint,
            Operation::TokenAssociate(_) => OperationKind::TokenAssociate,
            Operation::TokenGrantKyc(_) => OperationKind::TokenGrantKyc,
            Operation::TokenWipe(_) => OperationKind::TokenWipe,
            Operation::TokenPause(_) => OperationKind::TokenPause,
        }
    }
}

/// Discriminant for [`Operation`], used for dispatch and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Transfer,
    AccountCreate,
    TokenCreate,
    TokenMint,
    TokenAssociate,
    TokenGrantKyc,
    TokenWipe,
    TokenPause,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Transfer => "Transfer",
            OperationKind::AccountCreate => "AccountCreate",
            OperationKind::TokenCreate => "TokenCreate",
            OperationKind::TokenMint => "TokenMint",
            OperationKind::TokenAssociate => "TokenAssociate",
            OperationKind::TokenGrantKyc => "TokenGrantKyc",
            OperationKind::TokenWipe => "TokenWipe",
            OperationKind::TokenPause => "TokenPause",
        };
        write!(f, "{}", name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
