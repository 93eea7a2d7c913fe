use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{common::money::Money, domain::account::AccountId};

/// Sequence id assigned by the operation log on append.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub u64);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Credit,
    Debit,
}

/// An operation ready to be appended (no id assigned yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOperation {
    pub account_id: AccountId,
    pub op_type: OperationType,
    pub amount: Money,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl NewOperation {
    pub fn credit(account_id: AccountId, amount: Money, description: impl Into<String>) -> Self {
        Self::now(account_id, OperationType::Credit, amount, description)
    }

    pub fn debit(account_id: AccountId, amount: Money, description: impl Into<String>) -> Self {
        Self::now(account_id, OperationType::Debit, amount, description)
    }

    fn now(
        account_id: AccountId,
        op_type: OperationType,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_id,
            op_type,
            amount,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(self, id: OperationId) -> Operation {
        Operation {
            id,
            account_id: self.account_id,
            op_type: self.op_type,
            amount: self.amount,
            description: self.description,
            timestamp: self.timestamp,
        }
    }
}

/// An appended, immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub account_id: AccountId,
    pub op_type: OperationType,
    pub amount: Money,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Operation {
    /// Signed effect of this operation on the account balance.
    pub fn signed_amount(&self) -> Money {
        match self.op_type {
            OperationType::Credit => self.amount,
            OperationType::Debit => -self.amount,
        }
    }
}
