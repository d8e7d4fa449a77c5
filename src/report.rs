//! Presentation of a computed split.
//!
//! This is the only place amounts are rounded to cents.

use crate::engine::SplitOutcome;
use crate::error::Result;
use crate::model::Bill;
use crate::money::Money;
use crate::records::item_name;
use std::io::Write;

/// Header row of the per-member CSV.
pub const SPLIT_HEADER: [&str; 7] = [
    "member",
    "name",
    "actual_cost",
    "platform_fee",
    "free_cash_used",
    "discount",
    "final_payable",
];

/// Writes one CSV row per member, amounts rounded to cents.
pub fn write_splits<W: Write>(outcome: &SplitOutcome, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(SPLIT_HEADER)?;

    for split in &outcome.splits {
        csv_writer.write_record([
            split.member_id.to_string(),
            split.member_name.clone(),
            split.actual_cost.to_display_string(),
            split.platform_fee.to_display_string(),
            split.free_cash_used.to_display_string(),
            split.discount.to_display_string(),
            split.final_payable.to_display_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the bill totals and any collection warning as plain text.
pub fn write_summary<W: Write>(
    bill: &Bill,
    outcome: &SplitOutcome,
    mut writer: W,
) -> Result<()> {
    let totals = &outcome.reconciliation;

    writeln!(
        writer,
        "Invoice total:   {}",
        totals.total_extracted.to_display_string()
    )?;
    writeln!(
        writer,
        "Total collected: {}",
        totals.total_final.to_display_string()
    )?;

    let variance = totals.variance.to_cents();
    let sign = if variance > Money::ZERO { "+" } else { "" };
    writeln!(
        writer,
        "Difference:      {}{}",
        sign,
        variance.to_display_string()
    )?;

    if variance.is_negative() {
        writeln!(
            writer,
            "Warning: total collected is {} less than the invoice total",
            (Money::ZERO - variance).to_display_string()
        )?;
    }

    if totals.has_unassigned_items() {
        let names: Vec<&str> = totals
            .unassigned_items
            .iter()
            .map(|id| item_name(bill, id).unwrap_or(id.as_str()))
            .collect();
        writeln!(
            writer,
            "Warning: unassigned items worth {} are not charged to anyone: {}",
            totals.unassigned_total.to_display_string(),
            names.join(", ")
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_splits;
    use crate::model::{Assignment, Item, Member};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn outcome_for(bill: &Bill) -> SplitOutcome {
        let members = vec![
            Member::new("a", "Ana", Money::ZERO),
            Member::new("b", "Ben", Money::ZERO),
        ];
        compute_splits(bill, &members).unwrap()
    }

    #[test]
    fn test_split_csv_rounds_to_cents() {
        let mut bill = Bill::new(
            vec![Item::new("i1", "Pasta", money("30"), 1)],
            Decimal::TEN,
            Decimal::ZERO,
        );
        bill.assignments = vec![Assignment::new("i1", ["a", "b"])];

        let mut output = Vec::new();
        write_splits(&outcome_for(&bill), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(
            lines[0],
            "member,name,actual_cost,platform_fee,free_cash_used,discount,final_payable"
        );
        assert_eq!(lines[1], "a,Ana,15.00,1.50,0.00,0.00,16.50");
        assert_eq!(lines[2], "b,Ben,15.00,1.50,0.00,0.00,16.50");
    }

    #[test]
    fn test_summary_reports_over_collection() {
        let mut bill = Bill::new(
            vec![Item::new("i1", "Pasta", money("30"), 1)],
            Decimal::TEN,
            Decimal::ZERO,
        );
        bill.assignments = vec![Assignment::new("i1", ["a", "b"])];

        let mut output = Vec::new();
        write_summary(&bill, &outcome_for(&bill), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invoice total:   30.00"));
        assert!(text.contains("Total collected: 33.00"));
        assert!(text.contains("Difference:      +3.00"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_summary_ignores_sub_cent_shortfall() {
        let mut bill = Bill::new(
            vec![Item::new("i1", "Mint", money("0.01"), 1)],
            Decimal::ZERO,
            Decimal::TEN,
        );
        bill.assignments = vec![Assignment::new("i1", ["a"])];
        let outcome = outcome_for(&bill);
        assert_eq!(outcome.variance(), money("-0.001"));

        let mut output = Vec::new();
        write_summary(&bill, &outcome, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Difference:      0.00"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_summary_warns_about_unassigned_items() {
        let mut bill = Bill::new(
            vec![
                Item::new("i1", "Pasta", money("30"), 1),
                Item::new("i2", "Wine", money("12"), 1),
            ],
            Decimal::ZERO,
            Decimal::ZERO,
        );
        bill.assignments = vec![Assignment::new("i1", ["a", "b"])];

        let mut output = Vec::new();
        write_summary(&bill, &outcome_for(&bill), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Difference:      -12.00"));
        assert!(text.contains("total collected is 12.00 less"));
        assert!(text.contains("unassigned items worth 12.00 are not charged to anyone: Wine"));
    }
}
