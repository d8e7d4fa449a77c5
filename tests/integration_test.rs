//! Integration tests for the split engine CLI.
//!
//! These tests run the actual binary against CSV files written to a
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ITEMS: &str = "id,name,unit_price,quantity,assigned
i1,Platter,30.00,1,a;b
i2,Lemonade,3.00,2,b
";

const MEMBERS: &str = "id,name,free_cash
a,Ana,0
b,Ben,5.00
";

/// Writes the given items and members CSV files and returns their paths.
fn write_inputs(dir: &TempDir, items: &str, members: &str) -> (PathBuf, PathBuf) {
    let items_path = dir.path().join("items.csv");
    let members_path = dir.path().join("members.csv");
    fs::write(&items_path, items).unwrap();
    fs::write(&members_path, members).unwrap();
    (items_path, members_path)
}

/// Run the binary with the given arguments and return stdout
fn run_engine(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_splits_with_explicit_rates() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(&dir, ITEMS, MEMBERS);

    let output = run_engine(&[
        items.to_str().unwrap(),
        members.to_str().unwrap(),
        "10",
        "0",
    ]);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "member,name,actual_cost,platform_fee,free_cash_used,discount,final_payable",
            "a,Ana,15.00,1.50,0.00,0.00,16.50",
            "b,Ben,21.00,2.10,5.00,0.00,18.10",
        ]
    );
}

#[test]
fn test_default_fee_applied() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(
        &dir,
        "id,name,unit_price,quantity,assigned\ni1,Dinner,100,1,a\n",
        "id,name,free_cash\na,Ana,0\n",
    );

    let output = run_engine(&[items.to_str().unwrap(), members.to_str().unwrap()]);
    assert!(output.contains("a,Ana,100.00,2.50,0.00,0.00,102.50"));
}

#[test]
fn test_summary_on_stderr() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(&dir, ITEMS, MEMBERS);

    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    cmd.args([items.to_str().unwrap(), members.to_str().unwrap(), "0", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invoice total:   36.00"))
        .stderr(predicate::str::contains("Total collected: 31.00"))
        .stderr(predicate::str::contains("less than the invoice total"));
}

#[test]
fn test_unassigned_item_warning() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(
        &dir,
        "id,name,unit_price,quantity,assigned\ni1,Pizza,30,1,a;b\ni2,Wine,18,1,\n",
        MEMBERS,
    );

    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    cmd.args([items.to_str().unwrap(), members.to_str().unwrap(), "0", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "unassigned items worth 18.00 are not charged to anyone: Wine",
        ));
}

#[test]
fn test_invalid_rate_argument_treated_as_zero() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(
        &dir,
        "id,name,unit_price,quantity,assigned\ni1,Dinner,40,1,a\n",
        "id,name,free_cash\na,Ana,0\n",
    );

    let output = run_engine(&[
        items.to_str().unwrap(),
        members.to_str().unwrap(),
        "lots",
        "-5",
    ]);
    assert!(output.contains("a,Ana,40.00,0.00,0.00,0.00,40.00"));
}

#[test]
fn test_unknown_member_fails() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(
        &dir,
        "id,name,unit_price,quantity,assigned\ni1,Dinner,40,1,a;ghost\n",
        MEMBERS,
    );

    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    cmd.args([items.to_str().unwrap(), members.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown member ghost"));
}

#[test]
fn test_missing_file_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nonexistent.csv");

    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    cmd.args([missing.to_str().unwrap(), missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("split-engine").unwrap();
    cmd.arg("items.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_amounts_have_two_decimal_places() {
    let dir = TempDir::new().unwrap();
    let (items, members) = write_inputs(
        &dir,
        "id,name,unit_price,quantity,assigned\ni1,Cake,10,1,a;b;c\n",
        "id,name,free_cash\na,Ana,0\nb,Ben,0\nc,Cy,0\n",
    );

    let output = run_engine(&[
        items.to_str().unwrap(),
        members.to_str().unwrap(),
        "2.5",
        "0",
    ]);

    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        for part in &parts[2..] {
            let dot_pos = part.find('.').unwrap();
            assert_eq!(part.len() - dot_pos - 1, 2, "Expected 2 decimal places in: {}", part);
        }
    }
}
