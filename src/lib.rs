//! Bank-account ledger core.
//!
//! Tracks customer-owned current and saving accounts, applies credits, debits and
//! transfers under a per-account lock, keeps an append-only operation history and
//! serves paginated history queries alongside the current balance.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod store;
pub mod worker;

pub use common::{
    config::{LedgerConfig, TransferFailurePolicy},
    error::{ErrorKind, LedgerError, LedgerResult},
    money::Money,
};
pub use domain::{
    account::{Account, AccountId, AccountKind, AccountStatus, CustomerId},
    ledger::Ledger,
    operation::{Operation, OperationId, OperationType},
};
pub use worker::handlers::{history::AccountHistory, transfer::TransferReceipt};
