use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::{
    account::{Account, AccountId, CustomerId},
    operation::{NewOperation, Operation, OperationId},
};

use super::{AccountStore, CustomerDirectory, OperationLog, Page, StoreError};

fn poisoned() -> StoreError {
    StoreError::unavailable("lock poisoned")
}

/// In-memory account store. Intended for tests and the replay tool.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    fn put(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        accounts.insert(account.id, account);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LogState {
    entries: Vec<Operation>,
    by_account: HashMap<AccountId, Vec<usize>>,
}

/// In-memory append-only operation log.
///
/// Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryOperationLog {
    state: RwLock<LogState>,
}

impl InMemoryOperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl OperationLog for InMemoryOperationLog {
    fn append(&self, operation: NewOperation) -> Result<Operation, StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        let position = state.entries.len();
        let stored = operation.with_id(OperationId(position as u64 + 1));
        state
            .by_account
            .entry(stored.account_id)
            .or_default()
            .push(position);
        state.entries.push(stored.clone());

        Ok(stored)
    }

    fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Operation>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let ops = state
            .by_account
            .get(account_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&i| state.entries[i].clone())
                    .collect()
            })
            .unwrap_or_default();
        Ok(ops)
    }

    fn find_page_by_account(
        &self,
        account_id: &AccountId,
        page: usize,
        size: usize,
    ) -> Result<Page<Operation>, StoreError> {
        if size == 0 {
            return Ok(Page {
                items: Vec::new(),
                total_pages: 0,
            });
        }
        let state = self.state.read().map_err(|_| poisoned())?;
        let positions = state
            .by_account
            .get(account_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let page = Page::slice(positions, page, size);
        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(|i| state.entries[i].clone())
                .collect(),
            total_pages: page.total_pages,
        })
    }
}

/// In-memory customer directory; customers are added with [`register`](Self::register).
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: RwLock<HashSet<CustomerId>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(ids: impl IntoIterator<Item = CustomerId>) -> Self {
        Self {
            customers: RwLock::new(ids.into_iter().collect()),
        }
    }

    pub fn register(&self, customer_id: CustomerId) -> Result<(), StoreError> {
        let mut customers = self.customers.write().map_err(|_| poisoned())?;
        customers.insert(customer_id);
        Ok(())
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn exists(&self, customer_id: CustomerId) -> Result<bool, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        Ok(customers.contains(&customer_id))
    }
}
