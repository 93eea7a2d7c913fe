use std::sync::Arc;

use crate::{
    common::{
        config::LedgerConfig,
        error::{LedgerError, LedgerResult},
    },
    domain::account::{Account, AccountId},
    store::{
        AccountStore, CustomerDirectory, OperationLog,
        memory::{InMemoryAccountStore, InMemoryCustomerDirectory, InMemoryOperationLog},
    },
    worker::locks::AccountLocks,
};

/// The ledger: its collaborators, the per-account lock table and configuration.
///
/// Operations live in `worker` (`credit`, `debit`, `transfer`, `open_*`, `history`, ...).
/// A `Ledger` is `Sync`; share it between threads behind an `Arc` or a scoped borrow.
pub struct Ledger {
    accounts: Arc<dyn AccountStore>,
    operations: Arc<dyn OperationLog>,
    customers: Arc<dyn CustomerDirectory>,
    locks: AccountLocks,
    config: LedgerConfig,
}

impl Ledger {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        operations: Arc<dyn OperationLog>,
        customers: Arc<dyn CustomerDirectory>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            accounts,
            operations,
            customers,
            locks: AccountLocks::new(),
            config,
        }
    }

    /// Ledger over fresh in-memory stores, sharing `customers` with the caller.
    pub fn in_memory(customers: Arc<InMemoryCustomerDirectory>, config: LedgerConfig) -> Self {
        Self::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryOperationLog::new()),
            customers,
            config,
        )
    }

    pub fn accounts_store(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    pub fn operations(&self) -> &dyn OperationLog {
        self.operations.as_ref()
    }

    pub fn customers(&self) -> &dyn CustomerDirectory {
        self.customers.as_ref()
    }

    pub fn locks(&self) -> &AccountLocks {
        &self.locks
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Loads an account or fails with `AccountNotFound`.
    pub(crate) fn load(&self, id: &AccountId) -> LedgerResult<Account> {
        self.accounts
            .get(id)?
            .ok_or(LedgerError::AccountNotFound(*id))
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("locks", &self.locks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
