use std::{collections::HashMap, sync::Arc};

use crate::{
    common::{
        error::{AppError, ErrorKind, LedgerError},
        event::LedgerCommand,
    },
    domain::{
        account::{Account, AccountId},
        ledger::Ledger,
    },
    store::memory::InMemoryCustomerDirectory,
};

/// Replays [`LedgerCommand`]s against a ledger, binding account aliases to ids.
///
/// Rejected requests are logged and skipped, including rows naming an alias that was
/// never opened or is already bound. Only infrastructure failures abort.
#[derive(Debug)]
pub struct Processor {
    customers: Arc<InMemoryCustomerDirectory>,
    aliases: HashMap<String, AccountId>,
}

impl Processor {
    pub fn new(customers: Arc<InMemoryCustomerDirectory>) -> Self {
        Self {
            customers,
            aliases: HashMap::new(),
        }
    }

    pub fn process(&mut self, ledger: &Ledger, command: LedgerCommand) -> Result<(), AppError> {
        match self.apply(ledger, command) {
            Err(AppError::Ledger(err)) if !err.is_retryable() => {
                tracing::warn!(kind = err.kind().as_str(), error = %err, "command rejected");
                Ok(())
            }
            Err(err @ AppError::UnknownAlias(_)) => {
                tracing::warn!(kind = ErrorKind::AccountNotFound.as_str(), error = %err, "command rejected");
                Ok(())
            }
            Err(err @ AppError::DuplicateAlias(_)) => {
                tracing::warn!(error = %err, "command rejected");
                Ok(())
            }
            other => other,
        }
    }

    fn apply(&mut self, ledger: &Ledger, command: LedgerCommand) -> Result<(), AppError> {
        match command {
            LedgerCommand::RegisterCustomer { customer } => {
                self.customers
                    .register(customer)
                    .map_err(LedgerError::from)?;
            }
            LedgerCommand::OpenCurrent {
                alias,
                customer,
                initial_balance,
                overdraft_limit,
            } => {
                self.ensure_unbound(&alias)?;
                let acc = ledger.open_current_account(customer, initial_balance, overdraft_limit)?;
                self.aliases.insert(alias, acc.id);
            }
            LedgerCommand::OpenSaving {
                alias,
                customer,
                initial_balance,
                interest_rate,
            } => {
                self.ensure_unbound(&alias)?;
                let acc = ledger.open_saving_account(customer, initial_balance, interest_rate)?;
                self.aliases.insert(alias, acc.id);
            }
            LedgerCommand::Credit {
                alias,
                amount,
                description,
            } => {
                let id = self.resolve(&alias)?;
                ledger.credit(&id, amount, &description)?;
            }
            LedgerCommand::Debit {
                alias,
                amount,
                description,
            } => {
                let id = self.resolve(&alias)?;
                ledger.debit(&id, amount, &description)?;
            }
            LedgerCommand::Transfer {
                source,
                destination,
                amount,
                description,
            } => {
                let source = self.resolve(&source)?;
                let destination = self.resolve(&destination)?;
                ledger.transfer(&source, &destination, amount, &description)?;
            }
        }
        Ok(())
    }

    fn ensure_unbound(&self, alias: &str) -> Result<(), AppError> {
        if self.aliases.contains_key(alias) {
            return Err(AppError::DuplicateAlias(alias.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, alias: &str) -> Result<AccountId, AppError> {
        self.aliases
            .get(alias)
            .copied()
            .ok_or_else(|| AppError::UnknownAlias(alias.to_string()))
    }

    /// Current state of every aliased account, sorted by alias.
    pub fn accounts(&self, ledger: &Ledger) -> Result<Vec<(String, Account)>, AppError> {
        let mut rows = self
            .aliases
            .iter()
            .map(|(alias, id)| Ok((alias.clone(), ledger.account(id)?)))
            .collect::<Result<Vec<_>, LedgerError>>()?;
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(rows)
    }
}
