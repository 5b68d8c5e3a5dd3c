//! CSV format handling for the master snapshot and transaction logs
//!
//! This module centralizes all CSV format concerns, providing:
//! - SnapshotRecord structure for deserialization
//! - Conversion between snapshot rows and accounts
//! - Transaction log row formatting
//!
//! All functions are pure (no I/O) for easy testing. The round-trip
//! contract is byte-identical: loading a snapshot and immediately
//! re-saving it reproduces the same rows, because every decimal column is
//! re-rendered at the scale it was parsed with.

use crate::types::{
    Account, AccountKind, AccountNumber, AccountType, CreditTerms, SavingsTerms, TransactionRecord,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Master snapshot column headers
pub const SNAPSHOT_HEADERS: [&str; 6] = [
    "Type",
    "AccountNumber",
    "HolderName",
    "CurrentBalance",
    "RateOrLimit",
    "MinimumBalance",
];

/// Transaction log column headers
pub const LOG_HEADERS: [&str; 5] = ["Date", "Time", "Transaction", "Amount", "New Balance"];

/// Placeholder in the minimum-balance column of a credit row
pub const CREDIT_SENTINEL: &str = "N/A";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Snapshot record structure for deserialization
///
/// Decimal-valued columns stay as strings here so parse failures can be
/// reported per row instead of aborting the whole load.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SnapshotRecord {
    #[serde(rename = "Type")]
    pub account_type: String,
    #[serde(rename = "AccountNumber")]
    pub number: AccountNumber,
    #[serde(rename = "HolderName")]
    pub holder: String,
    #[serde(rename = "CurrentBalance")]
    pub balance: String,
    #[serde(rename = "RateOrLimit")]
    pub rate_or_limit: String,
    #[serde(rename = "MinimumBalance")]
    pub minimum: String,
}

/// Convert a deserialized snapshot row into an account
///
/// The rate-or-limit column restores the variant's terms (interest rate
/// for savings, credit limit for credit); columns the variant does not
/// persist fall back to the standard terms.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Account) - Successfully restored account
/// - Err(String) - Error message describing the conversion failure
pub fn convert_snapshot_record(record: SnapshotRecord) -> Result<Account, String> {
    let account_type = AccountType::from_label(record.account_type.trim()).ok_or_else(|| {
        format!(
            "Unknown account type '{}' for account {}",
            record.account_type, record.number
        )
    })?;

    let balance = parse_decimal(&record.balance, "balance", record.number)?;

    let kind = match account_type {
        AccountType::Savings => {
            let interest_rate =
                parse_decimal(&record.rate_or_limit, "interest rate", record.number)?;
            let min_balance = parse_decimal(&record.minimum, "minimum balance", record.number)?;
            AccountKind::Savings(SavingsTerms {
                interest_rate,
                min_balance,
            })
        }
        AccountType::Credit => {
            let credit_limit =
                parse_decimal(&record.rate_or_limit, "credit limit", record.number)?;
            AccountKind::Credit(CreditTerms {
                credit_limit,
                ..CreditTerms::default()
            })
        }
    };

    let holder = record.holder.trim();
    if holder.is_empty() {
        return Err(format!("Empty holder name for account {}", record.number));
    }

    Ok(Account::restore(
        record.number,
        holder.to_string(),
        kind,
        balance,
    ))
}

/// Render one account as a snapshot row
pub fn snapshot_row(account: &Account) -> [String; 6] {
    let (rate_or_limit, minimum) = match account.kind() {
        AccountKind::Savings(terms) => {
            (terms.interest_rate.to_string(), terms.min_balance.to_string())
        }
        AccountKind::Credit(terms) => {
            (terms.credit_limit.to_string(), CREDIT_SENTINEL.to_string())
        }
    };

    [
        account.account_type().as_str().to_string(),
        account.number().to_string(),
        account.holder().to_string(),
        format!("{:.2}", account.balance()),
        rate_or_limit,
        minimum,
    ]
}

/// Write the master snapshot in CSV format
///
/// Accounts are written in the order given (registry order), one row per
/// account, after the header row.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_snapshot_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(SNAPSHOT_HEADERS)
        .map_err(|e| format!("Failed to write snapshot header: {}", e))?;

    for account in accounts {
        writer
            .write_record(snapshot_row(account))
            .map_err(|e| format!("Failed to write snapshot row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Render one transaction record as a log row
///
/// Amounts are signed two-decimal strings, negative for debits.
pub fn log_row(record: &TransactionRecord) -> [String; 5] {
    [
        record.timestamp.format(DATE_FORMAT).to_string(),
        record.timestamp.format(TIME_FORMAT).to_string(),
        record.kind.as_str().to_string(),
        format!("{:.2}", record.amount),
        format!("{:.2}", record.balance_after),
    ]
}

fn parse_decimal(field: &str, what: &str, number: AccountNumber) -> Result<Decimal, String> {
    Decimal::from_str(field.trim())
        .map_err(|_| format!("Invalid {} '{}' for account {}", what, field, number))
}
