//! Bill-level totals and the gap between what is invoiced and what is collected.

use crate::model::{Bill, ItemId, PersonSplit};
use crate::money::Money;
use serde::Serialize;

/// Direction of the gap between collected and invoiced amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceKind {
    Balanced,
    /// Collected more than invoiced, e.g. fees exceed discounts and credits.
    OverCollection,
    /// Collected less than invoiced.
    Shortfall,
}

/// Totals for one computed split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Invoice subtotal: every item's extended price, assigned or not.
    pub total_extracted: Money,

    /// Sum of every member's final payable amount.
    pub total_final: Money,

    /// `total_final - total_extracted`.
    pub variance: Money,

    /// Items nobody pays for, in bill order.
    pub unassigned_items: Vec<ItemId>,

    /// Extended price of the unassigned items.
    pub unassigned_total: Money,
}

impl Reconciliation {
    pub fn variance_kind(&self) -> VarianceKind {
        if self.variance.is_zero() {
            VarianceKind::Balanced
        } else if self.variance.is_negative() {
            VarianceKind::Shortfall
        } else {
            VarianceKind::OverCollection
        }
    }

    /// The variance left after discounting unassigned items, i.e. the part
    /// produced by fees, credits and discounts alone.
    pub fn rate_variance(&self) -> Money {
        self.variance + self.unassigned_total
    }

    pub fn has_unassigned_items(&self) -> bool {
        !self.unassigned_items.is_empty()
    }
}

/// Aggregates per-member splits into bill totals.
pub fn reconcile(bill: &Bill, splits: &[PersonSplit]) -> Reconciliation {
    let total_extracted = bill.subtotal();
    let total_final: Money = splits.iter().map(|split| split.final_payable).sum();

    let unassigned = bill.unassigned_items();
    let unassigned_total = unassigned.iter().map(|item| item.extended_price()).sum();
    let unassigned_items = unassigned.into_iter().map(|item| item.id.clone()).collect();

    Reconciliation {
        total_extracted,
        total_final,
        variance: total_final - total_extracted,
        unassigned_items,
        unassigned_total,
    }
}
