//! Error types for the point ledger.

use crate::types::UserId;
use thiserror::Error;

/// Main error type for ledger operations.
///
/// Absence is not an error: queries for unknown users return a zero-value
/// balance or an empty history instead of failing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    #[error("Invalid user id: {0}")]
    InvalidId(UserId),

    #[error("Invalid amount: {0} (must be positive)")]
    InvalidAmount(i64),

    #[error("Insufficient funds: have {current}, requested {requested}")]
    InsufficientFunds { current: i64, requested: i64 },

    #[error("Balance overflow: {current} + {charge} exceeds the representable range")]
    BalanceOverflow { current: i64, charge: i64 },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, PointError>;
