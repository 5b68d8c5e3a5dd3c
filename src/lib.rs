//! Banking Ledger Library
//! # Overview
//!
//! This library implements a single-user banking ledger: savings and
//! credit accounts, deposits, withdrawals, transfers, monthly interest and
//! debt-interest charges, persisted to flat CSV files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransactionRecord, LedgerError)
//! - [`cli`] - CLI argument parsing and the interactive menu
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Operation orchestration and transfer consistency
//!   - [`core::registry`] - Account collection and number allocation
//! - [`io`] - CSV format handling and the flat-file store
//!
//! # Account Variants
//!
//! The ledger supports two account kinds with one operation contract:
//!
//! - **Savings**: minimum balance of 500.00, flat 5.00 fee per regular
//!   withdrawal, 4% annual interest applied monthly
//! - **Credit**: 5000.00 credit limit on top of any funded balance, 3%
//!   cash-advance fee, 15% annual interest charged monthly on debt
//!
//! # Consistency
//!
//! Every operation either completes fully or leaves all accounts
//! untouched. Transfers are the one two-step protocol: the fee-exempt
//! source leg must succeed before the destination is credited, and a
//! failing destination leg rolls the source back. Persistence is a
//! write-behind cache of the in-memory registry.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountRegistry, AccountSummary, LedgerStore, Operation, OperationEngine};
pub use crate::io::FileStore;
pub use crate::types::{
    Account, AccountKind, AccountNumber, AccountType, LedgerError, TransactionKind,
    TransactionRecord,
};
