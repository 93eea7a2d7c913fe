use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::{
    common::{
        error::{LedgerError, LedgerResult},
        money::Money,
    },
    domain::{
        account::{Account, AccountId, AccountKind, AccountStatus, CustomerId, floor_of},
        ledger::Ledger,
    },
};

pub fn current(
    ledger: &Ledger,
    customer_id: CustomerId,
    initial_balance: Money,
    overdraft_limit: Money,
) -> LedgerResult<Account> {
    ensure_customer(ledger, customer_id)?;
    if overdraft_limit.is_negative() {
        return Err(LedgerError::invalid_state(
            customer_id,
            format!("overdraft limit {overdraft_limit} is negative"),
        ));
    }
    open(
        ledger,
        customer_id,
        initial_balance,
        AccountKind::Current { overdraft_limit },
    )
}

pub fn saving(
    ledger: &Ledger,
    customer_id: CustomerId,
    initial_balance: Money,
    interest_rate: BigDecimal,
) -> LedgerResult<Account> {
    ensure_customer(ledger, customer_id)?;
    if interest_rate < BigDecimal::from(0) {
        return Err(LedgerError::invalid_state(
            customer_id,
            format!("interest rate {interest_rate} is negative"),
        ));
    }
    open(
        ledger,
        customer_id,
        initial_balance,
        AccountKind::Saving { interest_rate },
    )
}

fn ensure_customer(ledger: &Ledger, customer_id: CustomerId) -> LedgerResult<()> {
    if ledger.customers().exists(customer_id)? {
        Ok(())
    } else {
        Err(LedgerError::CustomerNotFound(customer_id))
    }
}

fn open(
    ledger: &Ledger,
    customer_id: CustomerId,
    initial_balance: Money,
    kind: AccountKind,
) -> LedgerResult<Account> {
    let floor = floor_of(&kind);
    if initial_balance < floor {
        return Err(LedgerError::invalid_state(
            customer_id,
            format!("initial balance {initial_balance} is below the floor {floor}"),
        ));
    }

    let account = Account {
        id: AccountId::new(),
        customer_id,
        balance: initial_balance,
        created_at: Utc::now(),
        status: AccountStatus::Created,
        kind,
    };
    ledger.accounts_store().put(account.clone())?;

    tracing::info!(
        account = %account.id,
        customer = %customer_id,
        kind = account.kind.as_str(),
        balance = %initial_balance,
        "account opened"
    );
    Ok(account)
}
