use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::money::Money;

/// Opaque account identifier, generated once at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Created,
    Activated,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Created => "CREATED",
            AccountStatus::Activated => "ACTIVATED",
            AccountStatus::Suspended => "SUSPENDED",
        }
    }
}

/// Kind-specific attributes. Stored as one record with a discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// May go below zero by at most `overdraft_limit`.
    Current { overdraft_limit: Money },
    /// Never below zero. The rate is informational only.
    Saving { interest_rate: BigDecimal },
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Current { .. } => "CURRENT",
            AccountKind::Saving { .. } => "SAVING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub customer_id: CustomerId,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub status: AccountStatus,
    pub kind: AccountKind,
}

impl Account {
    /// Lowest balance this account may hold.
    pub fn floor(&self) -> Money {
        floor_of(&self.kind)
    }

    /// Balance after debiting `amount`, or `None` if it would fall below the floor.
    pub fn balance_after_debit(&self, amount: Money) -> Option<Money> {
        self.balance
            .checked_sub(amount)
            .filter(|next| *next >= self.floor())
    }

    /// Whether debiting `amount` keeps the balance at or above the floor.
    pub fn can_cover(&self, amount: Money) -> bool {
        self.balance_after_debit(amount).is_some()
    }

    /// Copy of this account carrying a new balance.
    pub fn with_balance(&self, balance: Money) -> Account {
        Account {
            balance,
            ..self.clone()
        }
    }
}

pub(crate) fn floor_of(kind: &AccountKind) -> Money {
    match kind {
        AccountKind::Current { overdraft_limit } => -*overdraft_limit,
        AccountKind::Saving { .. } => Money::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(kind: AccountKind, balance: i64) -> Account {
        Account {
            id: AccountId::new(),
            customer_id: CustomerId(1),
            balance: Money::units(balance),
            created_at: Utc::now(),
            status: AccountStatus::Created,
            kind,
        }
    }

    #[test]
    fn current_account_floor_is_negative_overdraft() {
        let acc = account(
            AccountKind::Current {
                overdraft_limit: Money::units(500),
            },
            400,
        );
        assert_eq!(acc.floor(), Money::units(-500));
        assert!(acc.can_cover(Money::units(900)));
        assert!(!acc.can_cover(Money::units(1600)));
    }

    #[test]
    fn saving_account_floor_is_zero() {
        let acc = account(
            AccountKind::Saving {
                interest_rate: "3.5".parse().unwrap(),
            },
            0,
        );
        assert_eq!(acc.floor(), Money::zero());
        assert!(!acc.can_cover(Money::from_minor_units(1)));
    }

    #[test]
    fn debit_past_the_minor_unit_range_cannot_be_covered() {
        let acc = account(
            AccountKind::Current {
                overdraft_limit: Money::units(500),
            },
            -10,
        );
        let huge = Money::from_minor_units(i64::MAX);
        assert!(!acc.can_cover(huge));
        assert_eq!(acc.balance_after_debit(huge), None);
        assert_eq!(acc.balance_after_debit(Money::units(490)), Some(Money::units(-500)));
    }

    #[test]
    fn with_balance_keeps_identity() {
        let acc = account(
            AccountKind::Current {
                overdraft_limit: Money::zero(),
            },
            10,
        );
        let next = acc.with_balance(Money::units(7));
        assert_eq!(next.id, acc.id);
        assert_eq!(next.kind, acc.kind);
        assert_eq!(next.balance, Money::units(7));
    }

    #[test]
    fn account_id_round_trips_through_text() {
        let id = AccountId::new();
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<AccountId>().is_err());
    }
}
