//! Balance table: user id → current point total.

use crate::types::{Timestamp, UserBalance, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory balance table.
///
/// Reads never fail: an unknown user reads as the zero-value sentinel.
/// Writers are expected to hold the per-user mutation handle; the table's
/// own lock only protects the map structure, not read-modify-write cycles.
pub struct BalanceTable {
    entries: RwLock<HashMap<UserId, UserBalance>>,
}

impl BalanceTable {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Current balance for a user, or the zero sentinel if unknown.
    pub fn read(&self, user_id: UserId) -> UserBalance {
        self.entries
            .read()
            .get(&user_id)
            .copied()
            .unwrap_or_else(|| UserBalance::empty(user_id))
    }

    /// Unconditionally overwrite a user's balance.
    ///
    /// Returns the new state, stamped with the current time.
    pub fn write(&self, user_id: UserId, new_point: i64) -> UserBalance {
        let balance = UserBalance {
            user_id,
            point: new_point,
            updated_at: Timestamp::now(),
        };
        self.entries.write().insert(user_id, balance);
        balance
    }

    /// Number of users with a balance entry.
    pub fn user_count(&self) -> usize {
        self.entries.read().len()
    }
}

impl Default for BalanceTable {
    fn default() -> Self {
        Self::new()
    }
}
