//! Per-key mutation serializer.
//!
//! [`KeySerializer::with_lock`] runs a critical section with the guarantee
//! that no other call for the same key is inside its critical section at the
//! same time, while calls for distinct keys never block each other.
//!
//! ## Handle lifecycle
//!
//! Handles are created on demand and retired when the last holder releases
//! them. The reference count lives inside the registry entry and is only
//! touched while the registry lock is held, so get-or-create + increment and
//! decrement + conditional-remove are each atomic with respect to one
//! another. A waiter increments the count before blocking on the handle's
//! mutex; a releasing holder that then sees a nonzero count leaves the entry
//! in place. This closes the window where a departing holder could delete a
//! handle that a newly arrived caller is already queued on.
//!
//! The registry lock is held only for insert/lookup/remove, never across a
//! critical section.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A per-key mutation handle and its holder count.
struct HandleEntry {
    mutex: Arc<Mutex<()>>,

    /// Callers that have checked out this handle and not yet released it,
    /// including the current holder and queued waiters. Only read or
    /// written under the registry lock.
    refs: usize,
}

/// Serializes mutations per key.
///
/// An instance is owned by its service; there is no ambient global state.
pub struct KeySerializer<K> {
    registry: Mutex<HashMap<K, HandleEntry>>,
}

impl<K: Eq + Hash + Copy> KeySerializer<K> {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Run `critical` while holding the mutation handle for `key`.
    ///
    /// Blocks until any prior holder for the same key releases. The handle
    /// is released and retired on every exit path, including panics inside
    /// the critical section.
    pub fn with_lock<T>(&self, key: K, critical: impl FnOnce() -> T) -> T {
        let mutex = self.checkout(key);
        let _lease = Lease {
            serializer: self,
            key,
        };
        // The only blocking point. Drop order releases this guard before
        // the lease decrements the reference count.
        let _serialized = mutex.lock();
        critical()
    }

    /// Get-or-create the handle for a key and increment its holder count.
    fn checkout(&self, key: K) -> Arc<Mutex<()>> {
        let mut registry = self.registry.lock();
        let entry = registry.entry(key).or_insert_with(|| HandleEntry {
            mutex: Arc::new(Mutex::new(())),
            refs: 0,
        });
        entry.refs += 1;
        Arc::clone(&entry.mutex)
    }

    /// Decrement a key's holder count, removing the handle at zero.
    ///
    /// Any concurrent entrant incremented `refs` under the registry lock
    /// before we acquired it here, so a handle with queued waiters is never
    /// removed.
    fn release(&self, key: K) {
        let mut registry = self.registry.lock();
        if let Some(entry) = registry.get_mut(&key) {
            entry.refs -= 1;
            if entry.refs == 0 {
                registry.remove(&key);
            }
        }
    }

    /// Number of live handles (for leak checks and stats).
    pub fn handle_count(&self) -> usize {
        self.registry.lock().len()
    }
}

impl<K: Eq + Hash + Copy> Default for KeySerializer<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the holder count when dropped, so release runs on error
/// returns and panic unwinds alike.
struct Lease<'a, K: Eq + Hash + Copy> {
    serializer: &'a KeySerializer<K>,
    key: K,
}

impl<K: Eq + Hash + Copy> Drop for Lease<'_, K> {
    fn drop(&mut self) {
        self.serializer.release(self.key);
    }
}
