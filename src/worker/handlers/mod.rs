pub mod credit;
pub mod debit;
pub mod history;
pub mod open;
pub mod transfer;

use crate::{
    common::{
        error::{LedgerError, LedgerResult},
        money::Money,
    },
    domain::account::AccountId,
};

pub(crate) fn ensure_positive(account_id: &AccountId, amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount {
            account_id: *account_id,
            amount,
        })
    }
}
