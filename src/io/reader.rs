use bigdecimal::BigDecimal;

use crate::{
    common::{event::LedgerCommand, money::Money},
    domain::account::CustomerId,
};
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row matching the input headers. Columns a command does not use stay empty.
struct CsvRow {
    op: String,
    account: Option<String>,
    target: Option<String>,
    customer: Option<u64>,
    amount: Option<String>,
    param: Option<String>,
    description: Option<String>,
}

impl CsvRow {
    fn required<'a>(&self, field: &'a Option<String>, name: &str) -> Result<&'a str, String> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("{} missing {name}", self.op))
    }

    fn alias(&self, field: &Option<String>, name: &str) -> Result<String, String> {
        self.required(field, name).map(str::to_string)
    }

    fn customer(&self) -> Result<CustomerId, String> {
        self.customer
            .map(CustomerId)
            .ok_or_else(|| format!("{} missing customer", self.op))
    }

    fn money(&self, field: &Option<String>, name: &str) -> Result<Money, String> {
        let raw = self.required(field, name)?;
        Money::from_str(raw).map_err(|e| format!("{} invalid {name} {raw}: {e}", self.op))
    }

    fn description(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// Reads ledger commands from a CSV reader.
///
/// Headers: `op,account,target,customer,amount,param,description`. `op` is
/// case-insensitive; `param` is the overdraft limit for `open_current` and the
/// interest rate for `open_saving`.
///
/// # Examples
///
/// ```
/// use bank_ledger::io::reader::read_commands;
/// use bank_ledger::common::event::LedgerCommand;
/// use csv::ReaderBuilder;
///
/// let data = "op,account,target,customer,amount,param,description\n\
/// customer,,,1,,,\n\
/// open_current,alice,,1,100,50,\n\
/// debit,alice,,,25.5,,groceries\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(LedgerCommand::RegisterCustomer { .. })));
/// assert!(matches!(commands[1], Ok(LedgerCommand::OpenCurrent { .. })));
/// assert!(matches!(commands[2], Ok(LedgerCommand::Debit { .. })));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<LedgerCommand, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let op = row.op.trim().to_ascii_lowercase();

        match op.as_str() {
            "customer" => Ok(LedgerCommand::RegisterCustomer {
                customer: row.customer()?,
            }),
            "open_current" => Ok(LedgerCommand::OpenCurrent {
                alias: row.alias(&row.account, "account")?,
                customer: row.customer()?,
                initial_balance: row.money(&row.amount, "amount")?,
                overdraft_limit: row.money(&row.param, "overdraft limit")?,
            }),
            "open_saving" => {
                let raw = row.required(&row.param, "interest rate")?;
                let interest_rate = BigDecimal::from_str(raw)
                    .map_err(|e| format!("open_saving invalid interest rate {raw}: {e}"))?;
                Ok(LedgerCommand::OpenSaving {
                    alias: row.alias(&row.account, "account")?,
                    customer: row.customer()?,
                    initial_balance: row.money(&row.amount, "amount")?,
                    interest_rate,
                })
            }
            "credit" => Ok(LedgerCommand::Credit {
                alias: row.alias(&row.account, "account")?,
                amount: row.money(&row.amount, "amount")?,
                description: row.description(),
            }),
            "debit" => Ok(LedgerCommand::Debit {
                alias: row.alias(&row.account, "account")?,
                amount: row.money(&row.amount, "amount")?,
                description: row.description(),
            }),
            "transfer" => Ok(LedgerCommand::Transfer {
                source: row.alias(&row.account, "account")?,
                destination: row.alias(&row.target, "target")?,
                amount: row.money(&row.amount, "amount")?,
                description: row.description(),
            }),
            other => Err(format!("unknown command: {other}")),
        }
    })
}
