use crate::{
    common::{
        error::{LedgerError, LedgerResult},
        money::Money,
    },
    domain::{
        account::AccountId,
        ledger::Ledger,
        operation::{NewOperation, Operation},
    },
    worker::handlers::ensure_positive,
};

pub fn handle(
    ledger: &Ledger,
    account_id: &AccountId,
    amount: Money,
    description: &str,
) -> LedgerResult<Operation> {
    ensure_positive(account_id, amount)?;
    let _guard = ledger.locks().acquire(*account_id);
    apply(ledger, account_id, amount, description)
}

/// Credits an account whose lock the caller already holds.
pub(crate) fn apply(
    ledger: &Ledger,
    account_id: &AccountId,
    amount: Money,
    description: &str,
) -> LedgerResult<Operation> {
    let account = ledger.load(account_id)?;
    let Some(balance) = account.balance.checked_add(amount) else {
        tracing::warn!(
            account = %account_id,
            balance = %account.balance,
            requested = %amount,
            "credit rejected: balance overflow"
        );
        return Err(LedgerError::BalanceOverflow {
            account_id: *account_id,
            balance: account.balance,
            amount,
        });
    };

    // The operation record is durable before the balance that reflects it.
    let op = ledger
        .operations()
        .append(NewOperation::credit(*account_id, amount, description))?;
    ledger.accounts_store().put(account.with_balance(balance))?;

    tracing::info!(account = %account_id, %amount, %balance, operation = %op.id, "account credited");
    Ok(op)
}
