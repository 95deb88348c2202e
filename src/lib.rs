//! # Point Ledger
//!
//! An in-memory per-user point ledger: a balance table plus an append-only
//! transaction history, exposed through charge / use / query operations.
//!
//! ## Core Concepts
//!
//! - **Balances**: one live entry per user, overwritten in place
//! - **History**: append-only transaction records with monotonic ids
//! - **Serialization**: at most one in-flight mutation per user, while
//!   distinct users mutate concurrently
//!
//! Mutations for the same user are totally ordered by [`KeySerializer`];
//! queries never block on it.
//!
//! ## Example
//!
//! ```
//! use point_ledger::{PointService, UserId};
//!
//! let service = PointService::new();
//!
//! let balance = service.charge(UserId(1), 100)?;
//! assert_eq!(balance.point, 100);
//!
//! let balance = service.use_points(UserId(1), 40)?;
//! assert_eq!(balance.point, 60);
//!
//! let history = service.history(UserId(1))?;
//! assert_eq!(history.len(), 2);
//! # Ok::<(), point_ledger::PointError>(())
//! ```

pub mod balance;
pub mod error;
pub mod history;
pub mod serializer;
pub mod service;
pub mod types;
pub mod validate;

// Re-exports
pub use balance::BalanceTable;
pub use error::{PointError, Result};
pub use history::HistoryLog;
pub use serializer::KeySerializer;
pub use service::PointService;
pub use types::*;
