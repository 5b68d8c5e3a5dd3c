//! Banking Ledger CLI
//!
//! Interactive terminal front end for the banking ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir /path/to/database
//! ```
//!
//! The program loads the persisted registry from the data directory,
//! presents the menu loop, and flushes state back to disk after every
//! mutating operation.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (data directory not writable, snapshot unreadable, etc.)

use bank_ledger::cli;
use bank_ledger::io::FileStore;
use bank_ledger::OperationEngine;
use std::process;

fn main() {
    let args = cli::parse_args();

    let store = match FileStore::new(&args.data_dir) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    let mut engine = match OperationEngine::open(store) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    println!("System loaded: {} account(s) found.", engine.account_count());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(error) = cli::menu::run(&mut engine, &mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
