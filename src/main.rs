//! Split Engine CLI
//!
//! Reads a bill's items and a group's members from CSV and writes what each
//! member owes.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- items.csv members.csv [fee_percent] [discount_percent] > splits.csv
//! ```
//!
//! The fee defaults to 2.5% and the discount to 0%. Bill totals and warnings
//! go to stderr.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use split_engine::rate::{DEFAULT_DISCOUNT_PERCENT, DEFAULT_PLATFORM_FEE_PERCENT};
use split_engine::records::{read_bill, read_members};
use split_engine::report::{write_splits, write_summary};
use split_engine::{compute_splits, Percent, Result, SplitError};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(SplitError::MissingArgument);
    }

    let platform_fee = Percent::parse(
        Some(args.get(3).map_or(DEFAULT_PLATFORM_FEE_PERCENT, String::as_str)),
        "platform fee",
    );
    let discount = Percent::parse(
        Some(args.get(4).map_or(DEFAULT_DISCOUNT_PERCENT, String::as_str)),
        "discount",
    );

    let items = BufReader::new(File::open(&args[1])?);
    let bill = read_bill(items, platform_fee, discount)?;

    let members = BufReader::new(File::open(&args[2])?);
    let members = read_members(members)?;

    let outcome = compute_splits(&bill, &members)?;

    let stdout = io::stdout();
    write_splits(&outcome, stdout.lock())?;

    let stderr = io::stderr();
    write_summary(&bill, &outcome, stderr.lock())?;

    Ok(())
}
