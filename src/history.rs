//! Append-only transaction history log.

use crate::types::{Timestamp, TransactionId, TransactionRecord, TransactionType, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory append-only history log, keyed by user.
///
/// Record ids are assigned from a single monotonic counter, so they are
/// globally unique and increasing in append order.
pub struct HistoryLog {
    entries: RwLock<HashMap<UserId, Vec<TransactionRecord>>>,

    /// Next record id to assign.
    next_id: AtomicU64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a record for a user.
    ///
    /// Assigns the next id, stamps the current time, and returns the record.
    pub fn append(
        &self,
        user_id: UserId,
        amount: i64,
        tx_type: TransactionType,
    ) -> TransactionRecord {
        let record = TransactionRecord {
            id: TransactionId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id,
            amount,
            tx_type,
            timestamp: Timestamp::now(),
        };

        self.entries
            .write()
            .entry(user_id)
            .or_default()
            .push(record);

        record
    }

    /// All records for a user in append order. Empty for unknown users.
    pub fn list_by_user(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.entries
            .read()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total records across all users.
    pub fn transaction_count(&self) -> u64 {
        self.entries.read().values().map(|v| v.len() as u64).sum()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_has_empty_history() {
        let log = HistoryLog::new();
        assert!(log.list_by_user(UserId(9)).is_empty());
        assert_eq!(log.transaction_count(), 0);
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let log = HistoryLog::new();
        let a = log.append(UserId(1), 100, TransactionType::Charge);
        let b = log.append(UserId(2), 50, TransactionType::Charge);
        let c = log.append(UserId(1), 40, TransactionType::Use);

        assert_eq!(a.id, TransactionId(1));
        assert_eq!(b.id, TransactionId(2));
        assert_eq!(c.id, TransactionId(3));
    }

    #[test]
    fn test_list_preserves_append_order_per_user() {
        let log = HistoryLog::new();
        log.append(UserId(1), 100, TransactionType::Charge);
        log.append(UserId(2), 999, TransactionType::Charge);
        log.append(UserId(1), 40, TransactionType::Use);

        let records = log.list_by_user(UserId(1));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 100);
        assert_eq!(records[0].tx_type, TransactionType::Charge);
        assert_eq!(records[1].amount, 40);
        assert_eq!(records[1].tx_type, TransactionType::Use);

        assert_eq!(log.transaction_count(), 3);
    }
}
