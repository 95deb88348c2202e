//! Core types for the point ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a user. Valid ids start at 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Whether this id is in the valid range.
    pub fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a transaction record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_millis() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A user's current point balance.
///
/// One live instance per known user; overwritten in place on each mutation
/// inside that user's serialized critical section. Created implicitly on
/// first charge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    pub user_id: UserId,

    /// Current point total. Never negative.
    pub point: i64,

    /// When the balance was last written.
    pub updated_at: Timestamp,
}

impl UserBalance {
    /// Zero-value sentinel for a user with no balance entry.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            point: 0,
            updated_at: Timestamp::now(),
        }
    }
}

/// Direction of a balance mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Charge,
    Use,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Charge => write!(f, "CHARGE"),
            TransactionType::Use => write!(f, "USE"),
        }
    }
}

/// A single entry in the transaction history.
///
/// Immutable once appended; ordering is append order within a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Monotonically increasing, assigned by the log.
    pub id: TransactionId,

    pub user_id: UserId,

    /// Mutation amount. Always positive; the type carries the direction.
    pub amount: i64,

    pub tx_type: TransactionType,

    /// When the record was appended.
    pub timestamp: Timestamp,
}

/// Ledger statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerStats {
    /// Users with a balance entry.
    pub user_count: usize,

    /// Total transaction records across all users.
    pub transaction_count: u64,

    /// Live per-key mutation handles (nonzero only while mutations are
    /// in flight).
    pub active_handles: usize,
}
