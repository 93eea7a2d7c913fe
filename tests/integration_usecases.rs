use std::fs;
use std::io::Cursor;
use std::sync::Arc;

use bank_ledger::{
    LedgerConfig, domain::ledger::Ledger, store::memory::InMemoryCustomerDirectory,
    worker::processor::Processor,
};

fn run_case(input_csv: &str) -> String {
    let customers = Arc::new(InMemoryCustomerDirectory::new());
    let ledger = Ledger::in_memory(customers.clone(), LedgerConfig::default());
    let mut processor = Processor::new(customers);

    let rdr = Cursor::new(input_csv.as_bytes());
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    for row in bank_ledger::io::reader::read_commands(&mut csv_reader) {
        let command = row.expect("failed to parse input row");
        processor
            .process(&ledger, command)
            .expect("replay aborted");
    }

    let rows = processor.accounts(&ledger).expect("accounts readable");
    let mut out = Vec::<u8>::new();
    bank_ledger::io::writer::write_accounts(&mut out, &rows).expect("failed to write output CSV");
    String::from_utf8(out).expect("output was not valid UTF-8")
}

fn normalize_csv(s: &str) -> String {
    s.replace("\r\n", "\n")
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn case1_overdraft_saving_floor_and_transfer() {
    let input = fs::read_to_string("tests/fixtures/case1_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case1_expected.csv").unwrap();

    let actual = run_case(&input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
}

#[test]
fn case2_rejected_requests_leave_no_trace() {
    let input = fs::read_to_string("tests/fixtures/case2_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case2_expected.csv").unwrap();

    let actual = run_case(&input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
}

#[test]
fn run_requires_an_input_path() {
    let err = bank_ledger::app::run(["bank_ledger"]).unwrap_err();
    assert!(matches!(err, bank_ledger::common::error::AppError::MissingArg));
}
