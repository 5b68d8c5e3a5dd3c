//! Operation engine
//!
//! This module provides the `OperationEngine` that orchestrates every
//! state-changing operation against the account registry: opening
//! accounts, deposits and withdrawals, transfers, and month-end charges.
//!
//! The engine enforces the cross-account rules the accounts themselves
//! cannot see:
//! - transfer atomicity (abort untouched, or roll the source back)
//! - sequential account numbering through the registry's counters
//! - persistence flushes after each mutating operation
//!
//! A persistence failure is reported to the caller but never rolls back
//! committed in-memory state; the registry stays authoritative until the
//! next successful flush.

use crate::core::registry::AccountRegistry;
use crate::core::traits::LedgerStore;
use crate::types::{
    Account, AccountKind, AccountNumber, AccountType, LedgerError, TransactionRecord,
};
use rust_decimal::Decimal;

/// Balance-affecting request kinds accepted by [`OperationEngine::perform_transaction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
}

/// One row of the account listing
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub number: AccountNumber,
    pub holder: String,
    pub account_type: AccountType,
    pub balance: Decimal,
}

/// Orchestrates operations against the registry and triggers persistence
///
/// Generic over the storage seam so tests can run against in-memory
/// doubles while production uses the flat-file store.
pub struct OperationEngine<S: LedgerStore> {
    registry: AccountRegistry,
    store: S,
}

impl<S: LedgerStore> OperationEngine<S> {
    /// Open the engine over a store, loading the persisted registry
    ///
    /// # Errors
    ///
    /// Returns a persistence or parse error if the snapshot cannot be
    /// read, or `DuplicateAccount` if it carries colliding numbers.
    pub fn open(mut store: S) -> Result<Self, LedgerError> {
        let accounts = store.load_accounts()?;
        let registry = AccountRegistry::from_accounts(accounts)?;
        Ok(OperationEngine { registry, store })
    }

    /// Number of accounts currently registered
    pub fn account_count(&self) -> usize {
        self.registry.len()
    }

    /// Read-only lookup, for display concerns such as available credit
    pub fn get_account(&self, number: AccountNumber) -> Option<&Account> {
        self.registry.get(number)
    }

    /// Open a new account with an initial deposit
    ///
    /// Allocates the next sequential number for the variant, logs the
    /// opening record, inserts the account, and flushes.
    ///
    /// # Errors
    ///
    /// - `InvalidHolderName` for an empty or whitespace holder
    /// - `InvalidInitialDeposit` below the variant minimum
    ///   (500.00 savings, 5000.00 credit)
    pub fn create_account(
        &mut self,
        account_type: AccountType,
        holder: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(LedgerError::InvalidHolderName);
        }

        let minimum = account_type.min_initial_deposit();
        if initial_deposit < minimum {
            return Err(LedgerError::InvalidInitialDeposit {
                account_type,
                supplied: initial_deposit,
                minimum,
            });
        }

        let kind = match account_type {
            AccountType::Savings => AccountKind::savings(),
            AccountType::Credit => AccountKind::credit(),
        };
        let number = self.registry.allocate_number(account_type);
        let account = Account::open(number, holder.to_string(), kind, initial_deposit);
        self.registry.insert(account)?;

        self.persist(&[(number, 0)])?;
        Ok(number)
    }

    /// Deposit into or withdraw from a single account
    ///
    /// Dispatches to the account's own transition rules and propagates
    /// their failure kinds unchanged. Flushes on success.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown number, otherwise whatever the
    /// account operation reports.
    pub fn perform_transaction(
        &mut self,
        number: AccountNumber,
        operation: Operation,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let account = self
            .registry
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        let history_mark = account.history().len();
        match operation {
            Operation::Deposit => account.deposit(amount)?,
            Operation::Withdraw => account.withdraw(amount)?,
        }

        self.persist(&[(number, history_mark)])
    }

    /// Move funds between two accounts, all-or-nothing
    ///
    /// The source leg is fee-exempt but still subject to the variant's
    /// minimum-balance/credit-limit checks. If the source leg fails the
    /// transfer aborts with no state changed. If the destination leg
    /// fails (defensively guarded; it cannot under normal arithmetic),
    /// the withdrawn amount is credited back to the source before the
    /// failure is reported.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if either account is missing
    /// - `SameAccountTransfer` if source equals destination
    /// - the source leg's eligibility failure, unchanged
    pub fn transfer_funds(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if !self.registry.contains(from) {
            return Err(LedgerError::account_not_found(from));
        }
        if !self.registry.contains(to) {
            return Err(LedgerError::account_not_found(to));
        }
        if from == to {
            return Err(LedgerError::SameAccountTransfer { number: from });
        }

        // Source leg first; an ineligible withdrawal aborts the whole
        // transfer before anything is touched.
        let source = self
            .registry
            .get_mut(from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        let source_mark = source.history().len();
        source.transfer_out(amount)?;

        let destination = self
            .registry
            .get_mut(to)
            .ok_or_else(|| LedgerError::account_not_found(to))?;
        let destination_mark = destination.history().len();
        if let Err(error) = destination.transfer_in(amount) {
            // Roll back: return the withdrawn amount to the source. The
            // paired records stay in the history (it is append-only);
            // the net balance change is zero.
            let source = self
                .registry
                .get_mut(from)
                .ok_or_else(|| LedgerError::account_not_found(from))?;
            source.transfer_in(amount)?;
            self.persist(&[(from, source_mark)])?;
            return Err(error);
        }

        self.persist(&[(from, source_mark), (to, destination_mark)])
    }

    /// Apply month-end charges to every account
    ///
    /// Savings accounts earn monthly interest; credit accounts with an
    /// outstanding debt are charged debt interest. Accounts are processed
    /// independently: a failing account is reported on stderr and skipped,
    /// never blocking the rest. Returns the number of accounts actually
    /// charged (credit accounts in the black are no-ops). Flushes once at
    /// the end.
    pub fn apply_periodic_charges(&mut self) -> Result<usize, LedgerError> {
        let numbers: Vec<AccountNumber> = self.registry.iter().map(Account::number).collect();

        let mut touched = Vec::new();
        let mut charged = 0;
        for number in numbers {
            let Some(account) = self.registry.get_mut(number) else {
                continue;
            };
            let history_mark = account.history().len();
            match account.apply_periodic_charge() {
                Ok(Some(_)) => {
                    charged += 1;
                    touched.push((number, history_mark));
                }
                Ok(None) => {}
                Err(error) => {
                    eprintln!("Month-end charge failed for account {number}: {error}");
                }
            }
        }

        self.persist(&touched)?;
        Ok(charged)
    }

    /// Lazy, restartable listing of account summaries in registry order
    pub fn list_accounts(&self) -> impl Iterator<Item = AccountSummary> + '_ {
        self.registry.iter().map(|account| AccountSummary {
            number: account.number(),
            holder: account.holder().to_string(),
            account_type: account.account_type(),
            balance: account.balance(),
        })
    }

    /// Transaction history of one account, oldest first
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown number.
    pub fn get_history(&self, number: AccountNumber) -> Result<&[TransactionRecord], LedgerError> {
        self.registry
            .get(number)
            .map(Account::history)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Flush the operation's new history records, then rewrite the
    /// snapshot. `touched` pairs an account number with the history length
    /// before the operation; everything past that mark is new.
    fn persist(&mut self, touched: &[(AccountNumber, usize)]) -> Result<(), LedgerError> {
        for &(number, mark) in touched {
            if let Some(account) = self.registry.get(number) {
                let records = &account.history()[mark..];
                if !records.is_empty() {
                    self.store.append_history(account, records)?;
                }
            }
        }

        let accounts: Vec<&Account> = self.registry.iter().collect();
        self.store.save_snapshot(&accounts)
    }
}
