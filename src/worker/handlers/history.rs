use crate::{
    common::{
        error::{LedgerError, LedgerResult},
        money::Money,
    },
    domain::{account::AccountId, ledger::Ledger, operation::Operation},
};

/// One page of an account's operations together with its balance at query time.
///
/// `balance` is read from the account record, so it may reflect operations outside
/// `operations`, or a write that landed between the two reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHistory {
    pub account_id: AccountId,
    pub balance: Money,
    pub page: usize,
    pub size: usize,
    pub total_pages: usize,
    pub operations: Vec<Operation>,
}

/// Every operation of the account, oldest first. Unknown accounts have no history.
pub fn full(ledger: &Ledger, account_id: &AccountId) -> LedgerResult<Vec<Operation>> {
    Ok(ledger.operations().find_by_account(account_id)?)
}

pub fn paged(
    ledger: &Ledger,
    account_id: &AccountId,
    page: usize,
    size: usize,
) -> LedgerResult<AccountHistory> {
    if size == 0 {
        return Err(LedgerError::InvalidPageRequest {
            account_id: *account_id,
            page,
            size,
        });
    }

    let account = ledger.load(account_id)?;
    let found = ledger
        .operations()
        .find_page_by_account(account_id, page, size)?;

    tracing::debug!(account = %account_id, page, size, total_pages = found.total_pages, "history page read");
    Ok(AccountHistory {
        account_id: account.id,
        balance: account.balance,
        page,
        size,
        total_pages: found.total_pages,
        operations: found.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::handlers::testing::{current, ledger, saving};

    #[test]
    fn twelve_operations_make_three_pages_of_five() {
        let ledger = ledger();
        let acc = saving(&ledger, 0);
        for i in 1..=12 {
            ledger
                .credit(&acc.id, Money::units(i), &format!("deposit {i}"))
                .unwrap();
        }

        let page = paged(&ledger, &acc.id, 1, 5).unwrap();

        assert_eq!(page.operations.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 5);
        assert_eq!(page.account_id, acc.id);
        assert_eq!(page.balance, Money::units(78));
        assert_eq!(page.operations[0].description, "deposit 6");
        assert_eq!(page.operations[4].description, "deposit 10");

        let last = paged(&ledger, &acc.id, 2, 5).unwrap();
        assert_eq!(last.operations.len(), 2);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let ledger = ledger();
        let acc = current(&ledger, 100, 50);
        ledger.debit(&acc.id, Money::units(120), "").unwrap();
        ledger.credit(&acc.id, Money::units(3), "").unwrap();

        let first = paged(&ledger, &acc.id, 0, 10).unwrap();
        let second = paged(&ledger, &acc.id, 0, 10).unwrap();

        assert_eq!(first, second);
        assert_eq!(full(&ledger, &acc.id).unwrap(), first.operations);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_balance() {
        let ledger = ledger();
        let acc = saving(&ledger, 9);

        let page = paged(&ledger, &acc.id, 4, 3).unwrap();

        assert!(page.operations.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.balance, Money::units(9));
    }

    #[test]
    fn paged_history_of_unknown_account_fails() {
        let ledger = ledger();
        let missing = AccountId::new();

        let err = paged(&ledger, &missing, 0, 5).unwrap_err();

        assert_eq!(err, LedgerError::AccountNotFound(missing));
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let ledger = ledger();
        let acc = saving(&ledger, 0);

        let err = paged(&ledger, &acc.id, 0, 0).unwrap_err();

        assert_eq!(err.kind().as_str(), "INVALID_PAGE_REQUEST");
    }

    #[test]
    fn full_history_of_unknown_account_is_empty() {
        let ledger = ledger();

        assert!(full(&ledger, &AccountId::new()).unwrap().is_empty());
    }
}
