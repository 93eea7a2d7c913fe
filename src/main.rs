fn main() {
    if let Err(e) = bank_ledger::app::run(std::env::args()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
