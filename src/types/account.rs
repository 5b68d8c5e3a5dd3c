//! Account types and state-transition rules
//!
//! An [`Account`] is a closed tagged variant over the two account kinds the
//! ledger supports. The shared record (number, holder, balance, history) is
//! common to both; the kind tag carries the variant terms and selects the
//! rule set applied on withdrawal and at month end.
//!
//! Balances only change through the operations defined here. Every
//! transition is computed in full (with checked arithmetic) before any
//! field is mutated, so a rejected operation leaves the account untouched.

use crate::types::error::LedgerError;
use crate::types::transaction::{AccountNumber, TransactionKind, TransactionRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Minimum opening deposit for a savings account
pub const MIN_SAVINGS_DEPOSIT: Decimal = dec!(500.00);

/// Minimum opening deposit for a credit account
pub const MIN_CREDIT_DEPOSIT: Decimal = dec!(5000.00);

/// Smallest amount accepted for a regular savings withdrawal
pub const MIN_WITHDRAWAL_AMOUNT: Decimal = dec!(50.00);

/// Flat fee charged on a regular savings withdrawal
pub const WITHDRAWAL_FEE: Decimal = dec!(5.00);

/// Smallest amount accepted for a credit cash advance
pub const MIN_CASH_ADVANCE_AMOUNT: Decimal = dec!(500.00);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round a computed value (interest, fee) to currency precision
pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Account variant tag, as persisted and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Credit,
}

impl AccountType {
    /// Persisted label for the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Credit => "CREDIT",
        }
    }

    /// Parse a persisted label back into the variant
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SAVINGS" => Some(AccountType::Savings),
            "CREDIT" => Some(AccountType::Credit),
            _ => None,
        }
    }

    /// Minimum opening deposit for the variant
    pub fn min_initial_deposit(&self) -> Decimal {
        match self {
            AccountType::Savings => MIN_SAVINGS_DEPOSIT,
            AccountType::Credit => MIN_CREDIT_DEPOSIT,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Terms attached to a savings account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsTerms {
    /// Annual interest rate, applied monthly as rate / 12
    pub interest_rate: Decimal,
    /// Balance floor a withdrawal must not breach
    pub min_balance: Decimal,
}

impl Default for SavingsTerms {
    fn default() -> Self {
        SavingsTerms {
            interest_rate: dec!(0.04),
            min_balance: dec!(500.00),
        }
    }
}

/// Terms attached to a credit account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditTerms {
    /// Credit extended on top of any funded balance
    pub credit_limit: Decimal,
    /// Annual interest rate charged on a negative balance
    pub debt_interest_rate: Decimal,
    /// Percentage fee on each cash advance
    pub cash_advance_fee_rate: Decimal,
}

impl Default for CreditTerms {
    fn default() -> Self {
        CreditTerms {
            credit_limit: dec!(5000.00),
            debt_interest_rate: dec!(0.15),
            cash_advance_fee_rate: dec!(0.03),
        }
    }
}

/// Variant tag plus the terms that drive its rule set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountKind {
    Savings(SavingsTerms),
    Credit(CreditTerms),
}

impl AccountKind {
    /// Savings kind with the standard terms
    pub fn savings() -> Self {
        AccountKind::Savings(SavingsTerms::default())
    }

    /// Credit kind with the standard terms
    pub fn credit() -> Self {
        AccountKind::Credit(CreditTerms::default())
    }

    /// The variant tag for this kind
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Savings(_) => AccountType::Savings,
            AccountKind::Credit(_) => AccountType::Credit,
        }
    }
}

/// Which withdrawal entry point is being used
///
/// The transfer leg is internal-only: it suppresses fees and the
/// per-variant minimum-amount floors, while keeping the minimum-balance
/// and credit-limit eligibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WithdrawalLeg {
    Standard,
    Transfer,
}

/// One bank account: shared record plus variant rule set
///
/// Fields are private; the balance changes only through the operations
/// below and the history is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    balance: Decimal,
    kind: AccountKind,
    history: Vec<TransactionRecord>,
}

impl Account {
    /// Open a new account with an initial deposit
    ///
    /// Logs the opening "Account Created" record. Deposit validation
    /// (variant minimum) is the engine's responsibility.
    pub(crate) fn open(
        number: AccountNumber,
        holder: String,
        kind: AccountKind,
        initial_deposit: Decimal,
    ) -> Self {
        let mut account = Account {
            number,
            holder,
            balance: initial_deposit,
            kind,
            history: Vec::new(),
        };
        account.log_transaction(TransactionKind::AccountCreated, initial_deposit);
        account
    }

    /// Rebuild an account from a persisted snapshot row
    ///
    /// No record is logged; the persisted per-account log already holds
    /// this account's history.
    pub(crate) fn restore(
        number: AccountNumber,
        holder: String,
        kind: AccountKind,
        balance: Decimal,
    ) -> Self {
        Account {
            number,
            holder,
            balance,
            kind,
            history: Vec::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Current balance; pure read, no side effect
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    /// Append-only transaction history, oldest first
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Remaining spending capacity on a credit account
    ///
    /// `credit_limit + balance`: a funded positive balance extends the
    /// capacity 1:1, a negative balance consumes it. `None` for savings.
    pub fn available_credit(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Credit(terms) => Some(terms.credit_limit + self.balance),
            AccountKind::Savings(_) => None,
        }
    }

    /// Deposit funds into the account
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount is non-positive or carries
    /// sub-cent precision, `ArithmeticOverflow` if the balance cannot
    /// absorb it.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        self.credit(amount, TransactionKind::Deposit)
    }

    /// Incoming leg of a transfer; logs "Transfer In" instead of "Deposit"
    pub(crate) fn transfer_in(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        self.credit(amount, TransactionKind::TransferIn)
    }

    /// Withdraw funds, applying the variant's rule set and fees
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` for a non-positive amount
    /// - Savings: `BelowMinimumWithdrawal` under the 50.00 floor,
    ///   `BelowMinimumBalance` if the post-withdrawal (pre-fee) balance
    ///   would breach the minimum
    /// - Credit: `BelowMinimumAdvance` under the 500.00 floor,
    ///   `CreditLimitExceeded` if amount plus fee would overdraw the limit
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.withdraw_as(amount, WithdrawalLeg::Standard)
    }

    /// Outgoing leg of a transfer: fee-exempt, floor-exempt
    ///
    /// Still subject to the minimum-balance and credit-limit checks.
    /// Logs "Transfer Out" instead of "Withdrawal".
    pub(crate) fn transfer_out(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.withdraw_as(amount, WithdrawalLeg::Transfer)
    }

    fn withdraw_as(&mut self, amount: Decimal, leg: WithdrawalLeg) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;

        match self.kind {
            AccountKind::Savings(terms) => self.withdraw_savings(amount, leg, terms),
            AccountKind::Credit(terms) => self.withdraw_credit(amount, leg, terms),
        }
    }

    fn withdraw_savings(
        &mut self,
        amount: Decimal,
        leg: WithdrawalLeg,
        terms: SavingsTerms,
    ) -> Result<(), LedgerError> {
        if leg == WithdrawalLeg::Standard && amount < MIN_WITHDRAWAL_AMOUNT {
            return Err(LedgerError::BelowMinimumWithdrawal {
                supplied: amount,
                minimum: MIN_WITHDRAWAL_AMOUNT,
            });
        }

        // The eligibility check is against the pre-fee balance: the flat
        // fee may take the balance below the floor afterwards.
        let after_amount = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", self.number))?;

        if after_amount < terms.min_balance {
            return Err(LedgerError::BelowMinimumBalance {
                requested: amount,
                balance: self.balance,
                minimum: terms.min_balance,
            });
        }

        match leg {
            WithdrawalLeg::Transfer => {
                self.balance = after_amount;
                self.log_transaction(TransactionKind::TransferOut, -amount);
            }
            WithdrawalLeg::Standard => {
                let after_fee = after_amount
                    .checked_sub(WITHDRAWAL_FEE)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal fee", self.number))?;

                self.balance = after_amount;
                self.log_transaction(TransactionKind::Withdrawal, -amount);
                self.balance = after_fee;
                self.log_transaction(TransactionKind::WithdrawalFee, -WITHDRAWAL_FEE);
            }
        }

        Ok(())
    }

    fn withdraw_credit(
        &mut self,
        amount: Decimal,
        leg: WithdrawalLeg,
        terms: CreditTerms,
    ) -> Result<(), LedgerError> {
        if leg == WithdrawalLeg::Standard && amount < MIN_CASH_ADVANCE_AMOUNT {
            return Err(LedgerError::BelowMinimumAdvance {
                supplied: amount,
                minimum: MIN_CASH_ADVANCE_AMOUNT,
            });
        }

        let fee = match leg {
            WithdrawalLeg::Standard => round_currency(amount * terms.cash_advance_fee_rate),
            WithdrawalLeg::Transfer => Decimal::ZERO,
        };

        // Amount and fee come off the balance in one step.
        let total = amount
            .checked_add(fee)
            .ok_or_else(|| LedgerError::arithmetic_overflow("cash advance", self.number))?;
        let after = self
            .balance
            .checked_sub(total)
            .ok_or_else(|| LedgerError::arithmetic_overflow("cash advance", self.number))?;

        if after < -terms.credit_limit {
            return Err(LedgerError::CreditLimitExceeded {
                requested: amount,
                fee,
                available_credit: terms.credit_limit + self.balance,
            });
        }

        self.balance = after;
        match leg {
            WithdrawalLeg::Standard => {
                self.log_transaction(TransactionKind::Withdrawal, -amount);
                self.log_transaction(TransactionKind::CashAdvanceFee, -fee);
            }
            WithdrawalLeg::Transfer => {
                self.log_transaction(TransactionKind::TransferOut, -amount);
            }
        }

        Ok(())
    }

    /// Apply the variant's monthly charge
    ///
    /// Savings: credits `balance * rate / 12`, rounded to currency
    /// precision, and logs "Interest Applied". Credit: charges interest on
    /// the negative portion of the balance only, compounding the debt, and
    /// logs "Debt Interest Charged"; a non-negative balance is a no-op and
    /// logs nothing.
    ///
    /// Returns the absolute amount applied, or `None` for the credit
    /// no-op.
    pub fn apply_periodic_charge(&mut self) -> Result<Option<Decimal>, LedgerError> {
        match self.kind {
            AccountKind::Savings(terms) => {
                let interest =
                    round_currency(self.balance * terms.interest_rate / MONTHS_PER_YEAR);
                let after = self
                    .balance
                    .checked_add(interest)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("interest", self.number))?;

                self.balance = after;
                self.log_transaction(TransactionKind::InterestApplied, interest);
                Ok(Some(interest))
            }
            AccountKind::Credit(terms) => {
                if self.balance >= Decimal::ZERO {
                    return Ok(None);
                }

                let charge =
                    round_currency(-self.balance * terms.debt_interest_rate / MONTHS_PER_YEAR);
                let after = self
                    .balance
                    .checked_sub(charge)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("debt interest", self.number))?;

                self.balance = after;
                self.log_transaction(TransactionKind::DebtInterestCharged, -charge);
                Ok(Some(charge))
            }
        }
    }

    fn credit(&mut self, amount: Decimal, kind: TransactionKind) -> Result<(), LedgerError> {
        let after = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", self.number))?;

        self.balance = after;
        self.log_transaction(kind, amount);
        Ok(())
    }

    /// Append a record carrying the current (post-operation) balance.
    /// In-memory logging never fails.
    fn log_transaction(&mut self, kind: TransactionKind, amount: Decimal) {
        self.history
            .push(TransactionRecord::new(kind, amount, self.balance));
    }
}

/// Amounts must be positive and representable at two decimal places
fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO || amount.normalize().scale() > 2 {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(amount)
}
