//! Transaction history types for the banking ledger
//!
//! This module defines the transaction kind labels and the immutable
//! history record appended to an account after every balance-affecting
//! operation.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

/// Account identifier
///
/// Savings accounts are numbered from 1200, credit accounts from 1900.
/// Numbers are assigned sequentially per variant and never reused.
pub type AccountNumber = u32;

/// Kind label attached to every transaction record
///
/// Each variant corresponds to one balance-affecting event. Transfer legs
/// carry their own labels so a transfer is distinguishable from a plain
/// deposit/withdrawal pair in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Initial deposit at account opening
    AccountCreated,

    /// Funds credited to the account
    Deposit,

    /// Funds debited from the account (regular withdrawal or cash advance)
    Withdrawal,

    /// Flat fee charged on a regular savings withdrawal
    WithdrawalFee,

    /// Percentage fee charged on a credit cash advance
    CashAdvanceFee,

    /// Monthly interest credited to a savings balance
    InterestApplied,

    /// Monthly interest charged on an outstanding credit debt
    DebtInterestCharged,

    /// Incoming leg of a transfer
    TransferIn,

    /// Outgoing leg of a transfer (fee-exempt)
    TransferOut,
}

impl TransactionKind {
    /// Human-readable label used in history display and the persisted log
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::AccountCreated => "Account Created",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::WithdrawalFee => "Withdrawal Fee",
            TransactionKind::CashAdvanceFee => "Cash Advance Fee",
            TransactionKind::InterestApplied => "Interest Applied",
            TransactionKind::DebtInterestCharged => "Debt Interest Charged",
            TransactionKind::TransferIn => "Transfer In",
            TransactionKind::TransferOut => "Transfer Out",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in an account's history
///
/// Created only by the owning account's operations, never mutated or
/// deleted. The amount is signed: negative for debits (withdrawals, fees,
/// debt interest), positive for credits.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// When the event happened (local time)
    pub timestamp: NaiveDateTime,

    /// What happened
    pub kind: TransactionKind,

    /// Signed amount of the event
    pub amount: Decimal,

    /// Account balance immediately after the event
    pub balance_after: Decimal,
}

impl TransactionRecord {
    /// Create a record stamped with the current local time
    pub fn new(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        TransactionRecord {
            timestamp: Local::now().naive_local(),
            kind,
            amount,
            balance_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::account_created(TransactionKind::AccountCreated, "Account Created")]
    #[case::deposit(TransactionKind::Deposit, "Deposit")]
    #[case::withdrawal(TransactionKind::Withdrawal, "Withdrawal")]
    #[case::withdrawal_fee(TransactionKind::WithdrawalFee, "Withdrawal Fee")]
    #[case::cash_advance_fee(TransactionKind::CashAdvanceFee, "Cash Advance Fee")]
    #[case::interest(TransactionKind::InterestApplied, "Interest Applied")]
    #[case::debt_interest(TransactionKind::DebtInterestCharged, "Debt Interest Charged")]
    #[case::transfer_in(TransactionKind::TransferIn, "Transfer In")]
    #[case::transfer_out(TransactionKind::TransferOut, "Transfer Out")]
    fn test_kind_labels(#[case] kind: TransactionKind, #[case] expected: &str) {
        assert_eq!(kind.as_str(), expected);
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_record_captures_amount_and_balance() {
        let record = TransactionRecord::new(TransactionKind::Deposit, dec!(100.00), dec!(600.00));

        assert_eq!(record.kind, TransactionKind::Deposit);
        assert_eq!(record.amount, dec!(100.00));
        assert_eq!(record.balance_after, dec!(600.00));
    }
}
