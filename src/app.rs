use std::{
    io::{BufWriter, stdout},
    sync::Arc,
};

use crate::{
    common::{config::LedgerConfig, error::AppError, logging},
    domain::ledger::Ledger,
    io::{reader, writer},
    store::memory::InMemoryCustomerDirectory,
    worker::processor::Processor,
};

/// Replays a command CSV against an in-memory ledger and prints the resulting accounts.
///
/// `args[1]` is the command file, `args[2]` an optional JSON config file.
pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];

    let config = LedgerConfig::load(args.get(2).map(String::as_str))?;
    logging::init(&config);

    let file = std::fs::File::open(input_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let customers = Arc::new(InMemoryCustomerDirectory::new());
    let ledger = Ledger::in_memory(customers.clone(), config);
    let mut processor = Processor::new(customers);

    tracing::info!(input = %input_path, "replaying ledger commands");
    for command in reader::read_commands(&mut reader) {
        let command = command.map_err(AppError::Parse)?;
        processor.process(&ledger, command)?;
    }

    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    writer::write_accounts(writer, &processor.accounts(&ledger)?)?;

    Ok(())
}
