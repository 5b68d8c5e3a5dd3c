//! Interactive menu loop
//!
//! Thin glue between the terminal and the operation engine: prompts,
//! parses, delegates, and renders the outcome. All domain rules live in
//! the engine and the accounts; nothing here mutates state directly.
//!
//! The loop is generic over its reader and writer so sessions can be
//! scripted in tests.

use crate::core::{LedgerStore, Operation, OperationEngine};
use crate::io::csv_format::log_row;
use crate::types::{AccountNumber, AccountType, LedgerError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Unparsable input is re-prompted this many times before giving up
const MAX_INPUT_ATTEMPTS: usize = 3;

/// Run the menu loop until the user exits or input ends
pub fn run<S, R, W>(
    engine: &mut OperationEngine<S>,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    loop {
        write_menu(output)?;
        let Some(choice) = read_line(input)? else {
            break;
        };

        match choice.trim() {
            "1" => open_account(engine, input, output)?,
            "2" => transact(engine, input, output, Operation::Deposit)?,
            "3" => transact(engine, input, output, Operation::Withdraw)?,
            "4" => transfer(engine, input, output)?,
            "5" => list_accounts(engine, output)?,
            "6" => month_end(engine, output)?,
            "7" => show_history(engine, input, output)?,
            "8" => {
                writeln!(output, "Goodbye.")?;
                break;
            }
            other => writeln!(output, "Invalid option: {}", other)?,
        }
    }

    Ok(())
}

fn write_menu<W: Write>(output: &mut W) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "=== BANKING LEDGER ===")?;
    writeln!(output, "1. Open Account")?;
    writeln!(output, "2. Deposit")?;
    writeln!(output, "3. Withdraw")?;
    writeln!(output, "4. Transfer Money")?;
    writeln!(output, "5. Show All Accounts")?;
    writeln!(output, "6. Month-End Process")?;
    writeln!(output, "7. Transaction History")?;
    writeln!(output, "8. Exit")?;
    write!(output, "Select: ")?;
    output.flush()
}

fn open_account<S: LedgerStore, R: BufRead, W: Write>(
    engine: &mut OperationEngine<S>,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "--- Open New Account ---")?;
    writeln!(
        output,
        "1. Savings Account (min deposit {:.2})",
        AccountType::Savings.min_initial_deposit()
    )?;
    writeln!(
        output,
        "2. Credit Account  (min deposit {:.2})",
        AccountType::Credit.min_initial_deposit()
    )?;

    let Some(selection) = prompt::<u32, _, _>(input, output, "Select account type (1 or 2): ")?
    else {
        return Ok(());
    };
    let account_type = match selection {
        1 => AccountType::Savings,
        2 => AccountType::Credit,
        _ => {
            writeln!(output, "Invalid choice.")?;
            return Ok(());
        }
    };

    write!(output, "Enter holder name: ")?;
    output.flush()?;
    let Some(holder) = read_line(input)? else {
        return Ok(());
    };

    let Some(deposit) = prompt::<Decimal, _, _>(input, output, "Enter initial deposit amount: ")?
    else {
        return Ok(());
    };

    match engine.create_account(account_type, &holder, deposit) {
        Ok(number) => writeln!(output, "Account created successfully. Number: {}", number)?,
        Err(error) => report(output, &error)?,
    }
    Ok(())
}

fn transact<S: LedgerStore, R: BufRead, W: Write>(
    engine: &mut OperationEngine<S>,
    input: &mut R,
    output: &mut W,
    operation: Operation,
) -> std::io::Result<()> {
    let Some(number) = prompt::<AccountNumber, _, _>(input, output, "Enter account number: ")?
    else {
        return Ok(());
    };
    let Some(account) = engine.get_account(number) else {
        report(output, &LedgerError::account_not_found(number))?;
        return Ok(());
    };
    writeln!(output, "Current balance: {:.2}", account.balance())?;

    let label = match operation {
        Operation::Deposit => "deposit",
        Operation::Withdraw => "withdraw",
    };
    let Some(amount) =
        prompt::<Decimal, _, _>(input, output, &format!("Enter amount to {}: ", label))?
    else {
        return Ok(());
    };

    match engine.perform_transaction(number, operation, amount) {
        Ok(()) => {
            let balance = engine
                .get_account(number)
                .map(|account| account.balance())
                .unwrap_or_default();
            writeln!(output, "Done. New balance: {:.2}", balance)?;
            if let Some(available) = engine.get_account(number).and_then(|a| a.available_credit()) {
                writeln!(output, "Available credit: {:.2}", available)?;
            }
        }
        Err(error) => report(output, &error)?,
    }
    Ok(())
}

fn transfer<S: LedgerStore, R: BufRead, W: Write>(
    engine: &mut OperationEngine<S>,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "--- Money Transfer ---")?;
    let Some(from) = prompt::<AccountNumber, _, _>(input, output, "From account number: ")? else {
        return Ok(());
    };
    let Some(to) = prompt::<AccountNumber, _, _>(input, output, "To account number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt::<Decimal, _, _>(input, output, "Enter amount to transfer: ")? else {
        return Ok(());
    };

    match engine.transfer_funds(from, to, amount) {
        Ok(()) => writeln!(output, "Transfer successful: {:.2} transferred.", amount)?,
        Err(error) => report(output, &error)?,
    }
    Ok(())
}

fn list_accounts<S: LedgerStore, W: Write>(
    engine: &OperationEngine<S>,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "--- Account Registry ---")?;
    let mut any = false;
    for summary in engine.list_accounts() {
        any = true;
        writeln!(
            output,
            "[{}] {:<7} {} : {:.2}",
            summary.number, summary.account_type, summary.holder, summary.balance
        )?;
    }
    if !any {
        writeln!(output, "No accounts found.")?;
    }
    Ok(())
}

fn month_end<S: LedgerStore, W: Write>(
    engine: &mut OperationEngine<S>,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "--- End of Month Processing ---")?;
    match engine.apply_periodic_charges() {
        Ok(charged) => writeln!(output, "Charges applied to {} account(s).", charged)?,
        Err(error) => report(output, &error)?,
    }
    Ok(())
}

fn show_history<S: LedgerStore, R: BufRead, W: Write>(
    engine: &OperationEngine<S>,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    let Some(number) = prompt::<AccountNumber, _, _>(input, output, "Enter account number: ")?
    else {
        return Ok(());
    };

    match engine.get_history(number) {
        Ok(records) if records.is_empty() => {
            writeln!(output, "No transactions this session.")?;
        }
        Ok(records) => {
            for record in records {
                let [date, time, kind, amount, balance] = log_row(record);
                writeln!(
                    output,
                    "{} {}  {:<22} {:>12}  {:>12}",
                    date, time, kind, amount, balance
                )?;
            }
        }
        Err(error) => report(output, &error)?,
    }
    Ok(())
}

fn report<W: Write>(output: &mut W, error: &LedgerError) -> std::io::Result<()> {
    writeln!(output, "Error: {}", error)
}

/// Prompt for a value, retrying on unparsable input
///
/// Returns `None` after the attempt limit or at end of input; the caller
/// drops back to the menu.
fn prompt<T: FromStr, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<Option<T>> {
    for _ in 0..MAX_INPUT_ATTEMPTS {
        write!(output, "{}", label)?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(output, "Invalid format.")?,
        }
    }

    writeln!(output, "Maximum attempts reached. Returning to menu.")?;
    Ok(None)
}

/// Read one line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FileStore;
    use tempfile::TempDir;

    fn run_session(script: &str) -> (String, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let mut engine = OperationEngine::open(store).unwrap();

        let mut input = script.as_bytes();
        let mut output = Vec::new();
        run(&mut engine, &mut input, &mut output).unwrap();

        (String::from_utf8(output).unwrap(), dir)
    }

    #[test]
    fn test_exit_option_ends_session() {
        let (output, _dir) = run_session("8\n");
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (output, _dir) = run_session("");
        assert!(output.contains("=== BANKING LEDGER ==="));
    }

    #[test]
    fn test_open_account_and_list() {
        let script = "1\n1\nAsha Perera\n750.00\n5\n8\n";
        let (output, _dir) = run_session(script);

        assert!(output.contains("Account created successfully. Number: 1200"));
        assert!(output.contains("[1200] SAVINGS Asha Perera : 750.00"));
    }

    #[test]
    fn test_deposit_flow_reports_new_balance() {
        let script = "1\n1\nAsha Perera\n750.00\n2\n1200\n100.00\n8\n";
        let (output, _dir) = run_session(script);

        assert!(output.contains("Current balance: 750.00"));
        assert!(output.contains("Done. New balance: 850.00"));
    }

    #[test]
    fn test_rejected_withdrawal_is_reported() {
        let script = "1\n1\nAsha Perera\n600.00\n3\n1200\n150.00\n8\n";
        let (output, _dir) = run_session(script);

        assert!(output
            .contains("Error: Withdrawal of 150.00 would drop balance 600.00 below the minimum"));
    }

    #[test]
    fn test_unknown_account_is_reported() {
        let script = "2\n9999\n8\n";
        let (output, _dir) = run_session(script);

        assert!(output.contains("Error: Account 9999 not found"));
    }

    #[test]
    fn test_invalid_input_retries_then_returns_to_menu() {
        let script = "2\nnot-a-number\nstill-not\nnope\n8\n";
        let (output, _dir) = run_session(script);

        assert_eq!(output.matches("Invalid format.").count(), 3);
        assert!(output.contains("Maximum attempts reached. Returning to menu."));
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_history_lists_session_records() {
        let script = "1\n1\nAsha Perera\n750.00\n2\n1200\n100.00\n7\n1200\n8\n";
        let (output, _dir) = run_session(script);

        assert!(output.contains("Account Created"));
        assert!(output.contains("Deposit"));
    }

    #[test]
    fn test_invalid_menu_option() {
        let (output, _dir) = run_session("9\n8\n");
        assert!(output.contains("Invalid option: 9"));
    }
}
