//! Error types for ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a mining attempt produced no block.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineRejection {
    /// The address is not a registered miner.
    #[error("miner is not registered")]
    UnknownMiner,

    /// The miner exists but is not active.
    #[error("miner is not active")]
    InactiveMiner,

    /// There are no pending transactions.
    #[error("transaction pool is empty, nothing to mine")]
    EmptyPool,

    /// Every candidate transaction failed settlement.
    #[error("no pending transaction could be settled")]
    NothingSettleable,
}

/// Ledger errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Unknown account address.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Block index outside the chain.
    #[error("block not found: #{0}")]
    BlockNotFound(u64),

    /// Sender cannot cover amount plus fee.
    #[error("insufficient funds in {address}: required {required}, available {available}")]
    InsufficientFunds {
        address: String,
        required: Decimal,
        available: Decimal,
    },

    /// Amounts must be strictly positive.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Balance arithmetic left the representable range.
    #[error("amount overflow")]
    AmountOverflow,

    /// Mining preconditions were not met.
    #[error("mining rejected: {0}")]
    Rejected(#[from] MineRejection),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_) | Self::BlockNotFound(_))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
