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

/// Debits an account whose lock the caller already holds.
///
/// Existence is checked before sufficiency; a rejected debit writes nothing.
pub(crate) fn apply(
    ledger: &Ledger,
    account_id: &AccountId,
    amount: Money,
    description: &str,
) -> LedgerResult<Operation> {
    let account = ledger.load(account_id)?;

    let Some(balance) = account.balance_after_debit(amount) else {
        tracing::warn!(
            account = %account_id,
            balance = %account.balance,
            requested = %amount,
            "debit rejected: insufficient balance"
        );
        return Err(LedgerError::InsufficientBalance {
            account_id: *account_id,
            balance: account.balance,
            requested: amount,
            floor: account.floor(),
        });
    };

    let op = ledger
        .operations()
        .append(NewOperation::debit(*account_id, amount, description))?;
    ledger.accounts_store().put(account.with_balance(balance))?;

    tracing::info!(account = %account_id, %amount, %balance, operation = %op.id, "account debited");
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::operation::OperationType,
        worker::handlers::testing::{balance, current, ledger, saving},
    };

    #[test]
    fn debit_within_balance_does_not_touch_overdraft() {
        let ledger = ledger();
        let acc = current(&ledger, 1000, 500);

        let op = handle(&ledger, &acc.id, Money::units(600), "rent").unwrap();

        assert_eq!(balance(&ledger, &acc), Money::units(400));
        assert_eq!(op.op_type, OperationType::Debit);
        assert_eq!(op.amount, Money::units(600));
    }

    #[test]
    fn debit_beyond_overdraft_is_rejected_and_balance_kept() {
        let ledger = ledger();
        let acc = current(&ledger, 1000, 500);
        handle(&ledger, &acc.id, Money::units(600), "rent").unwrap();

        let err = handle(&ledger, &acc.id, Money::units(1600), "car").unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account_id: acc.id,
                balance: Money::units(400),
                requested: Money::units(1600),
                floor: Money::units(-500),
            }
        );
        assert_eq!(balance(&ledger, &acc), Money::units(400));
        assert_eq!(ledger.history(&acc.id).unwrap().len(), 1);
    }

    #[test]
    fn debit_may_use_the_whole_overdraft() {
        let ledger = ledger();
        let acc = current(&ledger, 100, 500);

        handle(&ledger, &acc.id, Money::units(600), "").unwrap();

        assert_eq!(balance(&ledger, &acc), Money::units(-500));
        assert!(handle(&ledger, &acc.id, Money::from_minor_units(1), "").is_err());
    }

    #[test]
    fn saving_account_cannot_go_below_zero() {
        let ledger = ledger();
        let acc = saving(&ledger, 0);

        let err = handle(&ledger, &acc.id, Money::units(1), "").unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(balance(&ledger, &acc), Money::zero());
    }

    #[test]
    fn saving_account_can_be_emptied_exactly() {
        let ledger = ledger();
        let acc = saving(&ledger, 75);

        handle(&ledger, &acc.id, Money::units(75), "").unwrap();

        assert_eq!(balance(&ledger, &acc), Money::zero());
    }

    #[test]
    fn unknown_account_is_reported_before_sufficiency() {
        let ledger = ledger();
        let missing = AccountId::new();

        let err = handle(&ledger, &missing, Money::units(1_000_000), "").unwrap_err();

        assert_eq!(err, LedgerError::AccountNotFound(missing));
    }

    #[test]
    fn debit_beyond_the_minor_unit_range_is_insufficient() {
        let ledger = ledger();
        let acc = current(&ledger, -10, 500);
        let huge = Money::from_minor_units(i64::MAX);

        let err = handle(&ledger, &acc.id, huge, "").unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account_id: acc.id,
                balance: Money::units(-10),
                requested: huge,
                floor: Money::units(-500),
            }
        );
        assert_eq!(balance(&ledger, &acc), Money::units(-10));
        assert!(ledger.history(&acc.id).unwrap().is_empty());
    }

    #[test]
    fn zero_debit_is_invalid() {
        let ledger = ledger();
        let acc = saving(&ledger, 10);

        let err = handle(&ledger, &acc.id, Money::zero(), "").unwrap_err();

        assert_eq!(err.kind().as_str(), "INVALID_AMOUNT");
    }
}
