use clap::Parser;
use std::path::PathBuf;

/// Single-user banking ledger over flat CSV files
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Single-user banking ledger with savings and credit accounts", long_about = None)]
pub struct CliArgs {
    /// Directory holding the master snapshot and per-account logs
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "database",
        help = "Data directory for the master snapshot and transaction logs"
    )]
    pub data_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::default(&["bank-ledger"], "database")]
    #[case::custom(&["bank-ledger", "--data-dir", "/tmp/ledger"], "/tmp/ledger")]
    fn test_data_dir_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.data_dir, Path::new(expected));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = CliArgs::try_parse_from(["bank-ledger", "--strategy", "sync"]);
        assert!(result.is_err());
    }
}
