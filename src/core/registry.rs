//! Account registry
//!
//! This module provides the `AccountRegistry` struct which is the in-memory
//! source of truth for all accounts during a session.
//!
//! The registry is responsible for:
//! - Owning every account, indexed by account number
//! - Preserving insertion order for listing
//! - Allocating sequential account numbers, one counter per variant
//!   (savings from 1200, credit from 1900), monotonic and never reused
//!
//! The counters are explicit registry state rather than hidden per-type
//! globals, which keeps numbering deterministic and testable.

use crate::types::{Account, AccountNumber, AccountType, LedgerError};
use std::collections::HashMap;

/// First savings account number
pub const SAVINGS_SEQUENCE_START: AccountNumber = 1200;

/// First credit account number
pub const CREDIT_SEQUENCE_START: AccountNumber = 1900;

/// In-memory collection of all accounts
///
/// Populated from the persisted snapshot at session start, mutated in place
/// by the operation engine, and serialized back after mutating operations.
pub struct AccountRegistry {
    /// Accounts indexed by account number
    accounts: HashMap<AccountNumber, Account>,

    /// Account numbers in insertion order, for listing
    order: Vec<AccountNumber>,

    /// Next savings account number to hand out
    next_savings: AccountNumber,

    /// Next credit account number to hand out
    next_credit: AccountNumber,
}

impl AccountRegistry {
    /// Create an empty registry with counters at their sequence starts
    pub fn new() -> Self {
        AccountRegistry {
            accounts: HashMap::new(),
            order: Vec::new(),
            next_savings: SAVINGS_SEQUENCE_START,
            next_credit: CREDIT_SEQUENCE_START,
        }
    }

    /// Build a registry from accounts restored out of a snapshot
    ///
    /// Each counter is bumped past the highest loaded number of its
    /// variant, so numbers are never reused across sessions.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if two rows carry the same number.
    pub fn from_accounts(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        let mut registry = AccountRegistry::new();
        for account in accounts {
            registry.insert(account)?;
        }
        Ok(registry)
    }

    /// Allocate the next sequential number for the variant
    ///
    /// Monotonic per variant; a number once handed out is never handed out
    /// again, even if the account it named is gone.
    pub fn allocate_number(&mut self, account_type: AccountType) -> AccountNumber {
        match account_type {
            AccountType::Savings => {
                let number = self.next_savings;
                self.next_savings += 1;
                number
            }
            AccountType::Credit => {
                let number = self.next_credit;
                self.next_credit += 1;
                number
            }
        }
    }

    /// Insert an account, keeping the variant counter ahead of its number
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if the number is already present.
    pub fn insert(&mut self, account: Account) -> Result<(), LedgerError> {
        let number = account.number();
        if self.accounts.contains_key(&number) {
            return Err(LedgerError::DuplicateAccount { number });
        }

        match account.account_type() {
            AccountType::Savings => {
                if number >= self.next_savings {
                    self.next_savings = number + 1;
                }
            }
            AccountType::Credit => {
                if number >= self.next_credit {
                    self.next_credit = number + 1;
                }
            }
        }

        self.order.push(number);
        self.accounts.insert(number, account);
        Ok(())
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    pub fn get(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub fn get_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Account> + '_ {
        self.order.iter().filter_map(|number| self.accounts.get(number))
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountKind;
    use rust_decimal_macros::dec;

    fn savings_account(number: AccountNumber) -> Account {
        Account::restore(
            number,
            "Asha Perera".to_string(),
            AccountKind::savings(),
            dec!(600.00),
        )
    }

    fn credit_account(number: AccountNumber) -> Account {
        Account::restore(
            number,
            "Nimal Silva".to_string(),
            AccountKind::credit(),
            dec!(5000.00),
        )
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = AccountRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn test_savings_numbers_are_sequential_from_1200() {
        let mut registry = AccountRegistry::new();

        for expected in [1200, 1201, 1202, 1203] {
            assert_eq!(registry.allocate_number(AccountType::Savings), expected);
        }
    }

    #[test]
    fn test_credit_numbers_are_sequential_from_1900() {
        let mut registry = AccountRegistry::new();

        for expected in [1900, 1901, 1902] {
            assert_eq!(registry.allocate_number(AccountType::Credit), expected);
        }
    }

    #[test]
    fn test_counters_are_independent_per_variant() {
        let mut registry = AccountRegistry::new();

        assert_eq!(registry.allocate_number(AccountType::Savings), 1200);
        assert_eq!(registry.allocate_number(AccountType::Credit), 1900);
        assert_eq!(registry.allocate_number(AccountType::Savings), 1201);
        assert_eq!(registry.allocate_number(AccountType::Credit), 1901);
    }

    #[test]
    fn test_numbers_are_not_reused_after_allocation() {
        let mut registry = AccountRegistry::new();

        let first = registry.allocate_number(AccountType::Savings);
        // Nothing was ever inserted under `first`; the counter still moves on.
        assert_eq!(registry.allocate_number(AccountType::Savings), first + 1);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = AccountRegistry::new();
        registry.insert(savings_account(1200)).unwrap();

        assert!(registry.contains(1200));
        assert_eq!(registry.get(1200).unwrap().number(), 1200);
        assert!(registry.get(1201).is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_number() {
        let mut registry = AccountRegistry::new();
        registry.insert(savings_account(1200)).unwrap();

        let result = registry.insert(savings_account(1200));

        assert_eq!(result, Err(LedgerError::DuplicateAccount { number: 1200 }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_accounts_bumps_counters_past_loaded_numbers() {
        let mut registry = AccountRegistry::from_accounts(vec![
            savings_account(1200),
            savings_account(1205),
            credit_account(1902),
        ])
        .unwrap();

        assert_eq!(registry.allocate_number(AccountType::Savings), 1206);
        assert_eq!(registry.allocate_number(AccountType::Credit), 1903);
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut registry = AccountRegistry::new();
        registry.insert(savings_account(1200)).unwrap();
        registry.insert(credit_account(1900)).unwrap();
        registry.insert(savings_account(1201)).unwrap();

        let numbers: Vec<AccountNumber> = registry.iter().map(Account::number).collect();
        assert_eq!(numbers, vec![1200, 1900, 1201]);
    }
}
