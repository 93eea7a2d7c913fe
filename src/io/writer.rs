use std::io::Write;

use crate::domain::account::{Account, AccountKind};

#[derive(serde::Serialize)]
/// Internal CSV output row.
///
/// Headers written (in this order):
/// `account,customer,kind,status,balance,overdraft_limit,interest_rate`.
/// The kind-specific column that does not apply is left empty.
struct OutputRow<'a> {
    account: &'a str,
    customer: u64,
    kind: &'static str,
    status: &'static str,
    balance: String,
    overdraft_limit: Option<String>,
    interest_rate: Option<String>,
}

/// Writes `(alias, account)` rows to a CSV writer in the order given.
///
/// Monetary fields are formatted with exactly 4 decimal places.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use bank_ledger::io::writer::write_accounts;
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &[]).unwrap();
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.is_empty() || s.starts_with("account,"));
/// ```
pub fn write_accounts<W: Write>(writer: W, accounts: &[(String, Account)]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for (alias, acc) in accounts {
        let (overdraft_limit, interest_rate) = match &acc.kind {
            AccountKind::Current { overdraft_limit } => (Some(overdraft_limit.to_string_4dp()), None),
            AccountKind::Saving { interest_rate } => (None, Some(interest_rate.to_string())),
        };
        let row = OutputRow {
            account: alias,
            customer: acc.customer_id.0,
            kind: acc.kind.as_str(),
            status: acc.status.as_str(),
            balance: acc.balance.to_string_4dp(),
            overdraft_limit,
            interest_rate,
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        common::money::Money,
        domain::account::{AccountId, AccountStatus, CustomerId},
    };

    fn account(kind: AccountKind, balance: Money) -> Account {
        Account {
            id: AccountId::new(),
            customer_id: CustomerId(9),
            balance,
            created_at: Utc::now(),
            status: AccountStatus::Created,
            kind,
        }
    }

    fn write_to_string(accounts: &[(String, Account)]) -> String {
        let mut out = Vec::new();
        write_accounts(&mut out, accounts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_header_and_kind_specific_columns() {
        let rows = vec![
            (
                "a".to_string(),
                account(
                    AccountKind::Current {
                        overdraft_limit: Money::units(500),
                    },
                    Money::from_minor_units(-12_345),
                ),
            ),
            (
                "b".to_string(),
                account(
                    AccountKind::Saving {
                        interest_rate: "3.5".parse().unwrap(),
                    },
                    Money::units(20),
                ),
            ),
        ];

        let s = write_to_string(&rows);
        let lines: Vec<&str> = s.lines().collect();

        assert_eq!(
            lines[0],
            "account,customer,kind,status,balance,overdraft_limit,interest_rate"
        );
        assert_eq!(lines[1], "a,9,CURRENT,CREATED,-1.2345,500.0000,");
        assert_eq!(lines[2], "b,9,SAVING,CREATED,20.0000,,3.5");
        assert_eq!(lines.len(), 3);
    }
}
