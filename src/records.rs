//! CSV records for members and bill items.
//!
//! Every row must parse: a skipped item would silently drop cost from the
//! bill, so malformed rows fail the whole read with the row number.

use crate::error::{Result, SplitError};
use crate::model::{Assignment, Bill, Item, ItemId, Member};
use crate::money::Money;
use crate::rate::Percent;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// Separator between member ids in the `assigned` column.
pub const ASSIGNEE_SEPARATOR: char = ';';

/// Raw member row: `id,name,free_cash`.
#[derive(Debug, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    pub name: String,

    /// Credit balance; blank means none.
    pub free_cash: Option<String>,
}

impl MemberRecord {
    /// Parses the raw CSV record into a member.
    pub fn parse(&self, row: usize) -> Result<Member> {
        let id = non_empty(&self.id, "id", row)?;

        let free_cash = match self.free_cash.as_deref().map(str::trim) {
            None | Some("") => Money::ZERO,
            Some(raw) => Money::from_str(raw).map_err(|e| SplitError::InvalidRecord {
                row,
                message: format!("free_cash {:?}: {}", raw, e),
            })?,
        };

        Ok(Member::new(id, self.name.trim(), free_cash))
    }
}

/// Raw item row: `id,name,unit_price,quantity,assigned`.
#[derive(Debug, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub unit_price: String,

    /// Blank means 1.
    pub quantity: Option<String>,

    /// `;`-separated member ids; blank means unassigned.
    pub assigned: Option<String>,
}

impl ItemRecord {
    /// Parses the raw CSV record into an item and its assignment.
    pub fn parse(&self, row: usize) -> Result<(Item, Assignment)> {
        let id = non_empty(&self.id, "id", row)?;

        let unit_price =
            Money::from_str(&self.unit_price).map_err(|e| SplitError::InvalidRecord {
                row,
                message: format!("unit_price {:?}: {}", self.unit_price.trim(), e),
            })?;

        let quantity = match self.quantity.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw.parse::<u32>().map_err(|e| SplitError::InvalidRecord {
                row,
                message: format!("quantity {:?}: {}", raw, e),
            })?,
        };

        if unit_price.checked_times(quantity).is_none() {
            return Err(SplitError::InvalidRecord {
                row,
                message: format!(
                    "{} x {} exceeds the limit of {}",
                    unit_price,
                    quantity,
                    Money::max_amount()
                ),
            });
        }

        let assignees = self
            .assigned
            .as_deref()
            .unwrap_or_default()
            .split(ASSIGNEE_SEPARATOR)
            .map(str::trim)
            .filter(|member| !member.is_empty());

        Ok((
            Item::new(id, self.name.trim(), unit_price, quantity),
            Assignment::new(id, assignees),
        ))
    }
}

fn non_empty<'a>(value: &'a str, field: &str, row: usize) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SplitError::InvalidRecord {
            row,
            message: format!("missing {}", field),
        });
    }
    Ok(trimmed)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Reads a group's members from CSV.
pub fn read_members<R: Read>(reader: R) -> Result<Vec<Member>> {
    let mut members = Vec::new();

    for (row_idx, result) in csv_reader(reader).deserialize::<MemberRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        let member = result?.parse(row_num)?;
        debug!(
            "Row {}: member {} with free cash {}",
            row_num, member.id, member.free_cash
        );
        members.push(member);
    }

    Ok(members)
}

/// Reads bill items and their assignments from CSV.
pub fn read_bill<R: Read>(
    reader: R,
    platform_fee_percent: Percent,
    discount_percent: Percent,
) -> Result<Bill> {
    let mut items = Vec::new();
    let mut assignments = Vec::new();

    for (row_idx, result) in csv_reader(reader).deserialize::<ItemRecord>().enumerate() {
        let row_num = row_idx + 2;
        let (item, assignment) = result?.parse(row_num)?;
        debug!(
            "Row {}: item {} x{} at {} for {} member(s)",
            row_num,
            item.id,
            item.quantity,
            item.unit_price,
            assignment.members.len()
        );
        items.push(item);
        assignments.push(assignment);
    }

    let mut bill = Bill::new(
        items,
        platform_fee_percent.as_decimal(),
        discount_percent.as_decimal(),
    );
    bill.assignments = assignments;
    Ok(bill)
}

/// Name of an item on the bill.
pub fn item_name<'a>(bill: &'a Bill, id: &ItemId) -> Option<&'a str> {
    bill.items
        .iter()
        .find(|item| &item.id == id)
        .map(|item| item.name.as_str())
}
