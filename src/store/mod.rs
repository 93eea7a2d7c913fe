//! Collaborators the ledger core depends on: account storage, the append-only
//! operation log and the customer directory.
//!
//! Implementations must be durable and read-your-writes: a successful `put` or
//! `append` is visible to every later read.

use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, CustomerId},
    operation::{NewOperation, Operation},
};

pub mod memory;

/// Infrastructure failure of a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Slices `all` into page `page` of `size` items.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn slice(all: &[T], page: usize, size: usize) -> Self {
        let total_pages = all.len().div_ceil(size);
        let items = all
            .iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();
        Page { items, total_pages }
    }
}

pub trait AccountStore: Send + Sync {
    fn get(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    fn list(&self) -> Result<Vec<Account>, StoreError>;

    fn put(&self, account: Account) -> Result<(), StoreError>;
}

pub trait OperationLog: Send + Sync {
    /// Appends and assigns the next sequence id. Durable before returning.
    fn append(&self, operation: NewOperation) -> Result<Operation, StoreError>;

    /// All operations of an account in append order.
    fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Operation>, StoreError>;

    fn find_page_by_account(
        &self,
        account_id: &AccountId,
        page: usize,
        size: usize,
    ) -> Result<Page<Operation>, StoreError>;
}

pub trait CustomerDirectory: Send + Sync {
    fn exists(&self, customer_id: CustomerId) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slices_and_counts_pages() {
        let all: Vec<u32> = (0..12).collect();

        let p = Page::slice(&all, 1, 5);
        assert_eq!(p.items, vec![5, 6, 7, 8, 9]);
        assert_eq!(p.total_pages, 3);

        let last = Page::slice(&all, 2, 5);
        assert_eq!(last.items, vec![10, 11]);

        let past_end = Page::slice(&all, 7, 5);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let p = Page::<u32>::slice(&[], 0, 10);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
    }
}
