//! Public ledger operations.
//!
//! Mutations hold the lock of every account they touch for the whole
//! load → validate → append → persist cycle. Reads take no locks.

use bigdecimal::BigDecimal;

use crate::{
    common::{error::LedgerResult, money::Money},
    domain::{
        account::{Account, AccountId, CustomerId},
        ledger::Ledger,
        operation::Operation,
    },
    worker::handlers::{
        credit, debit,
        history::{self, AccountHistory},
        open,
        transfer::{self, TransferReceipt},
    },
};

impl Ledger {
    pub fn credit(
        &self,
        account_id: &AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<Operation> {
        credit::handle(self, account_id, amount, description)
    }

    pub fn debit(
        &self,
        account_id: &AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<Operation> {
        debit::handle(self, account_id, amount, description)
    }

    pub fn transfer(
        &self,
        source: &AccountId,
        destination: &AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<TransferReceipt> {
        transfer::handle(self, source, destination, amount, description)
    }

    pub fn open_current_account(
        &self,
        customer_id: CustomerId,
        initial_balance: Money,
        overdraft_limit: Money,
    ) -> LedgerResult<Account> {
        open::current(self, customer_id, initial_balance, overdraft_limit)
    }

    pub fn open_saving_account(
        &self,
        customer_id: CustomerId,
        initial_balance: Money,
        interest_rate: BigDecimal,
    ) -> LedgerResult<Account> {
        open::saving(self, customer_id, initial_balance, interest_rate)
    }

    pub fn history(&self, account_id: &AccountId) -> LedgerResult<Vec<Operation>> {
        history::full(self, account_id)
    }

    pub fn paged_history(
        &self,
        account_id: &AccountId,
        page: usize,
        size: usize,
    ) -> LedgerResult<AccountHistory> {
        history::paged(self, account_id, page, size)
    }

    pub fn account(&self, account_id: &AccountId) -> LedgerResult<Account> {
        self.load(account_id)
    }

    /// All accounts, oldest first.
    pub fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.accounts_store().list()?)
    }
}
