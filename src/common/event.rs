use bigdecimal::BigDecimal;

use crate::{common::money::Money, domain::account::CustomerId};

/// A ledger request read from the replay input and sent to the processor.
///
/// Accounts are referred to by caller-chosen aliases; the processor binds each alias to
/// the generated id when the account is opened.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    RegisterCustomer {
        customer: CustomerId,
    },
    OpenCurrent {
        alias: String,
        customer: CustomerId,
        initial_balance: Money,
        overdraft_limit: Money,
    },
    OpenSaving {
        alias: String,
        customer: CustomerId,
        initial_balance: Money,
        interest_rate: BigDecimal,
    },
    Credit {
        alias: String,
        amount: Money,
        description: String,
    },
    Debit {
        alias: String,
        amount: Money,
        description: String,
    },
    Transfer {
        source: String,
        destination: String,
        amount: Money,
        description: String,
    },
}
