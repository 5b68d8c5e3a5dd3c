//! CLI argument parsing and the interactive menu

pub mod args;
pub mod menu;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments, exiting with a usage message on error
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
