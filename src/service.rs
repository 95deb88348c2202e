//! Point service tying all components together.

use crate::balance::BalanceTable;
use crate::error::{PointError, Result};
use crate::history::HistoryLog;
use crate::serializer::KeySerializer;
use crate::types::{LedgerStats, TransactionRecord, TransactionType, UserBalance, UserId};
use crate::validate;
use tracing::{debug, warn};

/// The point service.
///
/// Orchestrates charge/use/query over the balance table and history log,
/// serializing mutations per user through [`KeySerializer`]. Each instance
/// owns its own state; construct one and share it (e.g. behind an `Arc`)
/// with the transport layer.
///
/// Queries never take the serializer: a read may observe a balance between
/// two serialized writers' completions, but writes for the same user are
/// totally ordered among themselves.
pub struct PointService {
    balances: BalanceTable,
    history: HistoryLog,
    serializer: KeySerializer<UserId>,
}

impl PointService {
    pub fn new() -> Self {
        Self {
            balances: BalanceTable::new(),
            history: HistoryLog::new(),
            serializer: KeySerializer::new(),
        }
    }

    // --- Queries ---

    /// Current balance for a user.
    ///
    /// Unknown users read as the zero-value sentinel, not an error.
    pub fn balance(&self, user_id: UserId) -> Result<UserBalance> {
        validate::check_user_id(user_id)?;
        Ok(self.balances.read(user_id))
    }

    /// Transaction history for a user in append order.
    ///
    /// Empty for unknown users, not an error.
    pub fn history(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        validate::check_user_id(user_id)?;
        Ok(self.history.list_by_user(user_id))
    }

    // --- Mutations ---

    /// Add points to a user's balance, creating the balance on first charge.
    pub fn charge(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        validate::check_user_id(user_id)?;

        let result = self.serializer.with_lock(user_id, || {
            validate::check_positive(amount)?;

            let current = self.balances.read(user_id);
            let new_point =
                current
                    .point
                    .checked_add(amount)
                    .ok_or(PointError::BalanceOverflow {
                        current: current.point,
                        charge: amount,
                    })?;

            let updated = self.balances.write(user_id, new_point);
            self.history.append(user_id, amount, TransactionType::Charge);
            Ok(updated)
        });

        match &result {
            Ok(balance) => {
                debug!(user_id = %user_id, amount, point = balance.point, "charge completed")
            }
            Err(error) => warn!(user_id = %user_id, amount, %error, "charge rejected"),
        }

        result
    }

    /// Deduct points from a user's balance.
    ///
    /// Fails with `InsufficientFunds` before any write if the balance would
    /// go negative.
    pub fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        validate::check_user_id(user_id)?;

        let result = self.serializer.with_lock(user_id, || {
            validate::check_positive(amount)?;

            let current = self.balances.read(user_id);
            validate::check_sufficient(current.point, amount)?;

            let updated = self.balances.write(user_id, current.point - amount);
            self.history.append(user_id, amount, TransactionType::Use);
            Ok(updated)
        });

        match &result {
            Ok(balance) => {
                debug!(user_id = %user_id, amount, point = balance.point, "use completed")
            }
            Err(error) => warn!(user_id = %user_id, amount, %error, "use rejected"),
        }

        result
    }

    // --- Introspection ---

    /// Snapshot of ledger statistics.
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            user_count: self.balances.user_count(),
            transaction_count: self.history.transaction_count(),
            active_handles: self.serializer.handle_count(),
        }
    }
}

impl Default for PointService {
    fn default() -> Self {
        Self::new()
    }
}
