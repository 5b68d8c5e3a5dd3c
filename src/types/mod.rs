//! Core data types for the banking ledger
//!
//! This module contains the domain types used throughout the system:
//! accounts and their variant rule sets, transaction history records, and
//! the error taxonomy.

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{
    Account, AccountKind, AccountType, CreditTerms, SavingsTerms, MIN_CASH_ADVANCE_AMOUNT,
    MIN_CREDIT_DEPOSIT, MIN_SAVINGS_DEPOSIT, MIN_WITHDRAWAL_AMOUNT, WITHDRAWAL_FEE,
};
pub use error::LedgerError;
pub use transaction::{AccountNumber, TransactionKind, TransactionRecord};
