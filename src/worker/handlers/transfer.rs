use crate::{
    common::{
        config::TransferFailurePolicy,
        error::{LedgerError, LedgerResult},
        money::Money,
    },
    domain::{account::AccountId, ledger::Ledger, operation::Operation},
    worker::handlers::{credit, debit, ensure_positive},
};

/// The two legs of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub debit: Operation,
    pub credit: Operation,
}

fn leg_description(prefix: &str, other: &AccountId, description: &str) -> String {
    if description.is_empty() {
        format!("{prefix} {other}")
    } else {
        format!("{prefix} {other}: {description}")
    }
}

/// Debits `source` then credits `destination`, holding both account locks throughout.
///
/// A failed credit leg is handled per [`TransferFailurePolicy`].
pub fn handle(
    ledger: &Ledger,
    source: &AccountId,
    destination: &AccountId,
    amount: Money,
    description: &str,
) -> LedgerResult<TransferReceipt> {
    ensure_positive(source, amount)?;
    if source == destination {
        return Err(LedgerError::SameAccountTransfer(*source));
    }

    let _guards = ledger.locks().acquire_pair(*source, *destination);

    let debit = debit::apply(
        ledger,
        source,
        amount,
        &leg_description("Transfer to", destination, description),
    )?;

    let credit = match credit::apply(
        ledger,
        destination,
        amount,
        &leg_description("Transfer from", source, description),
    ) {
        Ok(op) => op,
        Err(err) => return Err(recover(ledger, source, destination, &debit, err)),
    };

    tracing::info!(
        source = %source,
        destination = %destination,
        %amount,
        "transfer applied"
    );
    Ok(TransferReceipt { debit, credit })
}

/// Handles a failed credit leg after the debit leg committed. Returns the error to surface.
fn recover(
    ledger: &Ledger,
    source: &AccountId,
    destination: &AccountId,
    debit: &Operation,
    err: LedgerError,
) -> LedgerError {
    let partial = |reason: String| LedgerError::TransferPartiallyApplied {
        source_account: *source,
        destination: *destination,
        debit: debit.id,
        reason,
    };

    match ledger.config().transfer_failure_policy {
        TransferFailurePolicy::Report => {
            tracing::error!(
                source = %source,
                destination = %destination,
                debit = %debit.id,
                error = %err,
                "transfer partially applied"
            );
            partial(err.to_string())
        }
        TransferFailurePolicy::Compensate => {
            let reversal = format!("Transfer to {destination} reversed");
            match credit::apply(ledger, source, debit.amount, &reversal) {
                Ok(op) => {
                    tracing::warn!(
                        source = %source,
                        destination = %destination,
                        debit = %debit.id,
                        compensation = %op.id,
                        error = %err,
                        "transfer credit failed; debit compensated"
                    );
                    err
                }
                Err(comp_err) => {
                    tracing::error!(
                        source = %source,
                        destination = %destination,
                        debit = %debit.id,
                        error = %err,
                        compensation_error = %comp_err,
                        "transfer compensation failed"
                    );
                    partial(format!("{err}; compensation failed: {comp_err}"))
                }
            }
        }
    }
}
