//! Flat-file implementation of the storage seam
//!
//! The `FileStore` keeps the whole ledger in a small directory tree:
//!
//! ```text
//! <data-dir>/
//!   accounts.csv              master snapshot, one row per account
//!   records/
//!     savings/acc_<n>.csv     per-account transaction log
//!     credit/acc_<n>.csv
//! ```
//!
//! The snapshot is rewritten after every mutating operation; the log files
//! are append-only. Rows that fail to parse on load are reported on stderr
//! and skipped, so one corrupt row does not take the whole ledger down.

use crate::core::traits::LedgerStore;
use crate::io::csv_format::{
    convert_snapshot_record, log_row, write_snapshot_csv, SnapshotRecord, LOG_HEADERS,
};
use crate::types::{Account, AccountType, LedgerError, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "accounts.csv";
const RECORDS_DIR: &str = "records";

/// Flat-file ledger storage rooted at a data directory
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open a store, creating the directory tree if needed
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the directories cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let data_dir = data_dir.into();
        for account_type in [AccountType::Savings, AccountType::Credit] {
            fs::create_dir_all(data_dir.join(RECORDS_DIR).join(records_subdir(account_type)))?;
        }
        Ok(FileStore { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    fn log_path(&self, account: &Account) -> PathBuf {
        self.data_dir
            .join(RECORDS_DIR)
            .join(records_subdir(account.account_type()))
            .join(format!("acc_{}.csv", account.number()))
    }
}

fn records_subdir(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Savings => "savings",
        AccountType::Credit => "credit",
    }
}

impl LedgerStore for FileStore {
    /// Load every account from the master snapshot
    ///
    /// A missing snapshot file is an empty ledger. Individual rows that
    /// fail to deserialize or convert are reported on stderr and skipped.
    fn load_accounts(&mut self) -> Result<Vec<Account>, LedgerError> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        let mut accounts = Vec::new();
        for (index, result) in reader.deserialize::<SnapshotRecord>().enumerate() {
            // Header is line 1, so data rows start at line 2.
            let line = index + 2;
            match result {
                Ok(record) => match convert_snapshot_record(record) {
                    Ok(account) => accounts.push(account),
                    Err(message) => {
                        eprintln!("Skipping snapshot line {}: {}", line, message);
                    }
                },
                Err(error) => {
                    eprintln!("Skipping snapshot line {}: {}", line, error);
                }
            }
        }

        Ok(accounts)
    }

    /// Rewrite the master snapshot with the current account states
    fn save_snapshot(&mut self, accounts: &[&Account]) -> Result<(), LedgerError> {
        let mut file = File::create(self.snapshot_path())?;
        write_snapshot_csv(accounts, &mut file).map_err(LedgerError::persistence)
    }

    /// Append freshly created history records to the account's log file
    ///
    /// The header row is written once, when the file is first created.
    fn append_history(
        &mut self,
        account: &Account,
        records: &[TransactionRecord],
    ) -> Result<(), LedgerError> {
        let path = self.log_path(account);
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        if is_new {
            writer
                .write_record(LOG_HEADERS)
                .map_err(|e| LedgerError::persistence(e.to_string()))?;
        }
        for record in records {
            writer
                .write_record(log_row(record))
                .map_err(|e| LedgerError::persistence(e.to_string()))?;
        }
        writer.flush()?;

        Ok(())
    }
}
