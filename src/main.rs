//! SplitStack CLI
//!
//! Reads a ledger CSV of users, groups, memberships and expenses and prints
//! the settling transfers (or the balances) of every group.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > settlements.csv
//! cargo run -- ledger.csv --balances > balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use splitstack::{Result, SplitEngine, SplitError};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

/// Which table to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Settlements,
    Balances,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (input_path, report) = parse_args(&args)?;

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut engine = SplitEngine::new();
    engine.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    match report {
        Report::Settlements => engine.write_settlements(handle)?,
        Report::Balances => engine.write_balances(handle)?,
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<(&str, Report)> {
    let mut input = None;
    let mut report = Report::Settlements;

    for arg in args {
        match arg.as_str() {
            "--balances" => report = Report::Balances,
            flag if flag.starts_with("--") => {
                return Err(SplitError::UnknownArgument(flag.to_string()))
            }
            path if input.is_none() => input = Some(path),
            extra => return Err(SplitError::UnknownArgument(extra.to_string())),
        }
    }

    let input = input.ok_or(SplitError::MissingArgument)?;
    Ok((input, report))
}
