use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::domain::account::AccountId;

/// Per-account mutual exclusion for balance mutations.
///
/// At most one guard per account id exists at a time. Guards are not reentrant;
/// pairs are always taken in ascending id order so two transfers over the same
/// accounts in opposite directions cannot deadlock.
#[derive(Debug, Default)]
pub struct AccountLocks {
    held: Mutex<HashSet<AccountId>>,
    released: Condvar,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> MutexGuard<'_, HashSet<AccountId>> {
        // The set is only touched under this mutex and never left half-updated.
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until `id` is free, then holds it until the guard drops.
    pub fn acquire(&self, id: AccountId) -> AccountGuard<'_> {
        let mut held = self.held();
        while held.contains(&id) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(id);
        AccountGuard { locks: self, id }
    }

    /// Holds two distinct accounts, lowest id first.
    pub fn acquire_pair(&self, a: AccountId, b: AccountId) -> (AccountGuard<'_>, AccountGuard<'_>) {
        debug_assert_ne!(a, b, "pair lock needs two distinct accounts");
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first = self.acquire(first);
        let second = self.acquire(second);
        (first, second)
    }

    pub fn is_held(&self, id: &AccountId) -> bool {
        self.held().contains(id)
    }
}

/// Releases its account when dropped.
#[derive(Debug)]
pub struct AccountGuard<'a> {
    locks: &'a AccountLocks,
    id: AccountId,
}

impl AccountGuard<'_> {
    pub fn account_id(&self) -> AccountId {
        self.id
    }
}

impl Drop for AccountGuard<'_> {
    fn drop(&mut self) {
        self.locks.held().remove(&self.id);
        self.locks.released.notify_all();
    }
}
