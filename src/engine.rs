//! Split computation over a bill snapshot.
//!
//! Runs allocation, fee/credit/discount application and reconciliation in
//! that order. Nothing is cached between calls: identical inputs always give
//! identical outcomes.

use crate::allocator::allocate;
use crate::applier::apply;
use crate::error::{Result, SplitError};
use crate::model::{Bill, ItemId, Member, PersonSplit};
use crate::money::Money;
use crate::rate::Percent;
use crate::reconciler::{reconcile, Reconciliation, VarianceKind};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Result of splitting one bill across a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitOutcome {
    /// One entry per member, in the order the members were given.
    pub splits: Vec<PersonSplit>,

    pub reconciliation: Reconciliation,
}

impl SplitOutcome {
    pub fn total_extracted(&self) -> Money {
        self.reconciliation.total_extracted
    }

    pub fn total_final(&self) -> Money {
        self.reconciliation.total_final
    }

    pub fn variance(&self) -> Money {
        self.reconciliation.variance
    }

    pub fn variance_kind(&self) -> VarianceKind {
        self.reconciliation.variance_kind()
    }

    pub fn unassigned_item_ids(&self) -> &[ItemId] {
        &self.reconciliation.unassigned_items
    }

    pub fn unassigned_total(&self) -> Money {
        self.reconciliation.unassigned_total
    }

    /// The split for a member, if they belong to the group.
    pub fn split_for(&self, member_id: &str) -> Option<&PersonSplit> {
        self.splits
            .iter()
            .find(|split| split.member_id.as_str() == member_id)
    }
}

/// Computes what every member owes for `bill`.
///
/// Out-of-range rates and negative credit are normalized and logged. Fails
/// only when the bill and member list contradict each other (duplicate ids,
/// assignments to unknown items or members, unusable items).
///
/// The bill's status is not consulted; freezing paid bills is the job of
/// [`crate::lifecycle::BillRecord`].
pub fn compute_splits(bill: &Bill, members: &[Member]) -> Result<SplitOutcome> {
    validate(bill, members)?;

    let platform_fee = Percent::sanitize(bill.platform_fee_percent, "platform fee");
    let discount = Percent::sanitize(bill.discount_percent, "discount");

    let allocation = allocate(bill);

    let splits: Vec<PersonSplit> = members
        .iter()
        .map(|member| apply(member, allocation.cost_for(&member.id), platform_fee, discount))
        .collect();

    let reconciliation = reconcile(bill, &splits);

    if reconciliation.has_unassigned_items() {
        warn!(
            "{} unassigned item(s) worth {} are not charged to anyone",
            reconciliation.unassigned_items.len(),
            reconciliation.unassigned_total
        );
    }
    debug!(
        "Split computed: extracted {}, collected {}, variance {}",
        reconciliation.total_extracted, reconciliation.total_final, reconciliation.variance
    );

    Ok(SplitOutcome {
        splits,
        reconciliation,
    })
}

/// Checks that the bill and member list agree with each other.
fn validate(bill: &Bill, members: &[Member]) -> Result<()> {
    let mut member_ids = HashSet::with_capacity(members.len());
    for member in members {
        if !member_ids.insert(&member.id) {
            return Err(SplitError::DuplicateMember {
                member: member.id.clone(),
            });
        }
    }

    // Running bill total; every amount downstream stays below it.
    let mut subtotal = Money::ZERO;
    let mut item_ids = HashSet::with_capacity(bill.items.len());
    for item in &bill.items {
        if !item_ids.insert(&item.id) {
            return Err(SplitError::DuplicateItem {
                item: item.id.clone(),
            });
        }
        if item.quantity == 0 {
            return Err(SplitError::InvalidItem {
                item: item.id.clone(),
                message: "quantity must be at least 1".to_string(),
            });
        }
        if item.unit_price.is_negative() {
            return Err(SplitError::InvalidItem {
                item: item.id.clone(),
                message: format!("negative unit price {}", item.unit_price),
            });
        }
        subtotal = item
            .unit_price
            .checked_times(item.quantity)
            .and_then(|extended| subtotal.checked_add(extended))
            .ok_or_else(|| SplitError::InvalidItem {
                item: item.id.clone(),
                message: format!("amount exceeds the limit of {}", Money::max_amount()),
            })?;
    }

    let mut assigned_items = HashSet::with_capacity(bill.assignments.len());
    for assignment in &bill.assignments {
        if !item_ids.contains(&assignment.item_id) {
            return Err(SplitError::UnknownItem {
                item: assignment.item_id.clone(),
            });
        }
        if !assigned_items.insert(&assignment.item_id) {
            return Err(SplitError::DuplicateAssignment {
                item: assignment.item_id.clone(),
            });
        }
        if let Some(unknown) = assignment
            .members
            .iter()
            .find(|member| !member_ids.contains(member))
        {
            return Err(SplitError::UnknownMember {
                item: assignment.item_id.clone(),
                member: unknown.clone(),
            });
        }
    }

    Ok(())
}
