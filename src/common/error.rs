use thiserror::Error;

use crate::{
    common::money::Money,
    domain::{
        account::{AccountId, CustomerId},
        operation::OperationId,
    },
    store::StoreError,
};

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failure of a ledger operation.
///
/// Everything except `StoreUnavailable` is a rejected request: retrying it unchanged
/// cannot succeed. `StoreUnavailable` may be retried by re-issuing the whole operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error(
        "insufficient balance on account {account_id}: balance {balance}, requested {requested}, floor {floor}"
    )]
    InsufficientBalance {
        account_id: AccountId,
        balance: Money,
        requested: Money,
        floor: Money,
    },

    #[error(
        "balance of account {account_id} cannot absorb {amount}: balance {balance} would overflow"
    )]
    BalanceOverflow {
        account_id: AccountId,
        balance: Money,
        amount: Money,
    },

    #[error("invalid account state for customer {customer_id}: {reason}")]
    InvalidAccountState {
        customer_id: CustomerId,
        reason: String,
    },

    #[error("invalid amount {amount} for account {account_id}: must be positive")]
    InvalidAmount { account_id: AccountId, amount: Money },

    #[error("invalid page request for account {account_id}: page {page}, size {size}")]
    InvalidPageRequest {
        account_id: AccountId,
        page: usize,
        size: usize,
    },

    #[error("cannot transfer from account {0} to itself")]
    SameAccountTransfer(AccountId),

    #[error(
        "transfer from {source_account} to {destination} partially applied: debit operation {debit} committed, credit failed: {reason}"
    )]
    TransferPartiallyApplied {
        source_account: AccountId,
        destination: AccountId,
        debit: OperationId,
        reason: String,
    },

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Stable, machine-readable classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccountNotFound,
    CustomerNotFound,
    InsufficientBalance,
    BalanceOverflow,
    InvalidAccountState,
    InvalidAmount,
    InvalidPageRequest,
    SameAccountTransfer,
    TransferPartiallyApplied,
    StoreUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorKind::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            ErrorKind::InsufficientBalance => "INSUFFICIENT_BALANCE",
            ErrorKind::BalanceOverflow => "BALANCE_OVERFLOW",
            ErrorKind::InvalidAccountState => "INVALID_ACCOUNT_STATE",
            ErrorKind::InvalidAmount => "INVALID_AMOUNT",
            ErrorKind::InvalidPageRequest => "INVALID_PAGE_REQUEST",
            ErrorKind::SameAccountTransfer => "SAME_ACCOUNT_TRANSFER",
            ErrorKind::TransferPartiallyApplied => "TRANSFER_PARTIALLY_APPLIED",
            ErrorKind::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AccountNotFound(_) => ErrorKind::AccountNotFound,
            LedgerError::CustomerNotFound(_) => ErrorKind::CustomerNotFound,
            LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            LedgerError::BalanceOverflow { .. } => ErrorKind::BalanceOverflow,
            LedgerError::InvalidAccountState { .. } => ErrorKind::InvalidAccountState,
            LedgerError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            LedgerError::InvalidPageRequest { .. } => ErrorKind::InvalidPageRequest,
            LedgerError::SameAccountTransfer(_) => ErrorKind::SameAccountTransfer,
            LedgerError::TransferPartiallyApplied { .. } => ErrorKind::TransferPartiallyApplied,
            LedgerError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::StoreUnavailable(_))
    }

    pub(crate) fn invalid_state(customer_id: CustomerId, reason: impl Into<String>) -> Self {
        LedgerError::InvalidAccountState {
            customer_id,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the command-line replay tool.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: bank_ledger <commands.csv> [config.json]")]
    MissingArg,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unknown account alias {0}")]
    UnknownAlias(String),
    #[error("account alias {0} already opened")]
    DuplicateAlias(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
