//! Storage seam between the operation engine and persistence
//!
//! The engine treats storage as a write-behind cache of the registry: the
//! in-memory state is authoritative during a session, and the store is
//! asked to catch up after each mutating operation. Keeping the seam as a
//! trait lets the engine run against the flat-file store in production and
//! against in-memory doubles in tests.

use crate::types::{Account, LedgerError, TransactionRecord};

/// Persistence interface consumed by the operation engine
pub trait LedgerStore {
    /// Load every account from the persisted snapshot
    ///
    /// An absent snapshot is an empty ledger, not an error.
    fn load_accounts(&mut self) -> Result<Vec<Account>, LedgerError>;

    /// Rewrite the master snapshot with the current account states
    fn save_snapshot(&mut self, accounts: &[&Account]) -> Result<(), LedgerError>;

    /// Append freshly created history records to an account's log file
    fn append_history(
        &mut self,
        account: &Account,
        records: &[TransactionRecord],
    ) -> Result<(), LedgerError>;
}
