//! Validation rules for ledger operations.
//!
//! Pure functions, called before any store mutation so a failed request
//! never leaves a partial write behind.

use crate::error::{PointError, Result};
use crate::types::UserId;

/// Reject ids outside the valid range (ids start at 1).
pub fn check_user_id(user_id: UserId) -> Result<()> {
    if !user_id.is_valid() {
        return Err(PointError::InvalidId(user_id));
    }
    Ok(())
}

/// Reject non-positive mutation amounts.
pub fn check_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(PointError::InvalidAmount(amount));
    }
    Ok(())
}

/// Reject a use that would drive the balance negative.
pub fn check_sufficient(current: i64, amount: i64) -> Result<()> {
    if current - amount < 0 {
        return Err(PointError::InsufficientFunds {
            current,
            requested: amount,
        });
    }
    Ok(())
}
