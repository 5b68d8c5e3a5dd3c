//! Error types for the banking ledger
//!
//! All domain rule violations are surfaced to the caller as values of
//! [`LedgerError`], never as panics. Every variant carries enough context
//! to render a useful message at the terminal.
//!
//! # Error Categories
//!
//! - **Request validation**: invalid amounts, empty holder names, deposits
//!   below the variant minimum.
//! - **Domain rules**: minimum-withdrawal floors, minimum-balance floor,
//!   credit limit, same-account transfers.
//! - **Registry**: unknown or duplicate account numbers.
//! - **Arithmetic**: overflow detected by checked balance arithmetic.
//! - **Persistence**: storage read/write failures. These are reported but
//!   never roll back committed in-memory state; the registry stays
//!   authoritative until the next successful flush.

use crate::types::account::AccountType;
use crate::types::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking ledger
///
/// Each variant is recoverable at the call site: a failed operation leaves
/// every account exactly as it was (persistence failures excepted, which
/// leave in-memory state committed and only the flush unfinished).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is non-positive or carries sub-cent precision
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Account holder name is empty or whitespace
    #[error("Holder name cannot be empty")]
    InvalidHolderName,

    /// Opening deposit is below the variant's minimum
    #[error("Minimum initial deposit for a {account_type} account is {minimum:.2}, got {supplied:.2}")]
    InvalidInitialDeposit {
        /// Variant being opened
        account_type: AccountType,
        /// Deposit that was offered
        supplied: Decimal,
        /// Required minimum for the variant
        minimum: Decimal,
    },

    /// Referenced account number is not in the registry
    #[error("Account {number} not found")]
    AccountNotFound {
        /// The missing account number
        number: AccountNumber,
    },

    /// Transfer source and destination are the same account
    #[error("Cannot transfer account {number} to itself")]
    SameAccountTransfer {
        /// The account number supplied for both legs
        number: AccountNumber,
    },

    /// Withdrawal amount is below the savings floor
    #[error("Minimum withdrawal amount is {minimum:.2}, got {supplied:.2}")]
    BelowMinimumWithdrawal {
        /// Amount that was requested
        supplied: Decimal,
        /// Savings withdrawal floor
        minimum: Decimal,
    },

    /// Cash advance amount is below the credit floor
    #[error("Minimum cash advance amount is {minimum:.2}, got {supplied:.2}")]
    BelowMinimumAdvance {
        /// Amount that was requested
        supplied: Decimal,
        /// Credit cash-advance floor
        minimum: Decimal,
    },

    /// Savings withdrawal would breach the minimum-balance floor
    #[error("Withdrawal of {requested:.2} would drop balance {balance:.2} below the minimum of {minimum:.2}")]
    BelowMinimumBalance {
        /// Amount that was requested
        requested: Decimal,
        /// Balance before the withdrawal
        balance: Decimal,
        /// Minimum balance that must remain
        minimum: Decimal,
    },

    /// Credit withdrawal (plus fee) would exceed the credit limit
    #[error("Credit limit exceeded: requested {requested:.2} (fee {fee:.2}), available credit {available_credit:.2}")]
    CreditLimitExceeded {
        /// Amount that was requested
        requested: Decimal,
        /// Cash-advance fee that would apply
        fee: Decimal,
        /// Remaining spending capacity
        available_credit: Decimal,
    },

    /// Snapshot row carries an account number already in the registry
    #[error("Duplicate account number {number}")]
    DuplicateAccount {
        /// The colliding account number
        number: AccountNumber,
    },

    /// Checked balance arithmetic overflowed
    #[error("Arithmetic overflow in {operation} for account {number}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being mutated
        number: AccountNumber,
    },

    /// Snapshot row could not be parsed
    #[error("Snapshot parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Underlying storage read/write failed
    #[error("Persistence failure: {message}")]
    Persistence {
        /// Description of the storage error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Persistence {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for the variants built in more than one place

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(number: AccountNumber) -> Self {
        LedgerError::AccountNotFound { number }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, number: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            number,
        }
    }

    /// Create a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        LedgerError::Persistence {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: dec!(-5) },
        "Invalid amount: -5"
    )]
    #[case::invalid_holder(
        LedgerError::InvalidHolderName,
        "Holder name cannot be empty"
    )]
    #[case::invalid_initial_deposit(
        LedgerError::InvalidInitialDeposit {
            account_type: AccountType::Savings,
            supplied: dec!(100),
            minimum: dec!(500),
        },
        "Minimum initial deposit for a SAVINGS account is 500.00, got 100.00"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { number: 1234 },
        "Account 1234 not found"
    )]
    #[case::same_account(
        LedgerError::SameAccountTransfer { number: 1200 },
        "Cannot transfer account 1200 to itself"
    )]
    #[case::below_minimum_withdrawal(
        LedgerError::BelowMinimumWithdrawal { supplied: dec!(20), minimum: dec!(50) },
        "Minimum withdrawal amount is 50.00, got 20.00"
    )]
    #[case::below_minimum_advance(
        LedgerError::BelowMinimumAdvance { supplied: dec!(100), minimum: dec!(500) },
        "Minimum cash advance amount is 500.00, got 100.00"
    )]
    #[case::below_minimum_balance(
        LedgerError::BelowMinimumBalance {
            requested: dec!(150),
            balance: dec!(600),
            minimum: dec!(500),
        },
        "Withdrawal of 150.00 would drop balance 600.00 below the minimum of 500.00"
    )]
    #[case::credit_limit_exceeded(
        LedgerError::CreditLimitExceeded {
            requested: dec!(5200),
            fee: dec!(156.00),
            available_credit: dec!(5000),
        },
        "Credit limit exceeded: requested 5200.00 (fee 156.00), available credit 5000.00"
    )]
    #[case::duplicate_account(
        LedgerError::DuplicateAccount { number: 1900 },
        "Duplicate account number 1900"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), number: 1200 },
        "Arithmetic overflow in deposit for account 1200"
    )]
    #[case::parse_with_line(
        LedgerError::Parse { line: Some(3), message: "bad row".to_string() },
        "Snapshot parse error at line 3: bad row"
    )]
    #[case::parse_without_line(
        LedgerError::Parse { line: None, message: "bad row".to_string() },
        "Snapshot parse error: bad row"
    )]
    #[case::persistence(
        LedgerError::Persistence { message: "disk full".to_string() },
        "Persistence failure: disk full"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::Persistence { .. }));
        assert_eq!(error.to_string(), "Persistence failure: Permission denied");
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            LedgerError::invalid_amount(dec!(0)),
            LedgerError::InvalidAmount { amount: dec!(0) }
        );
        assert_eq!(
            LedgerError::account_not_found(9999),
            LedgerError::AccountNotFound { number: 9999 }
        );
        assert_eq!(
            LedgerError::arithmetic_overflow("deposit", 1200),
            LedgerError::ArithmeticOverflow {
                operation: "deposit".to_string(),
                number: 1200
            }
        );
    }
}
