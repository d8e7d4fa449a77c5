//! Distributes each item's extended price across its assigned members.

use crate::model::{Bill, ItemId, MemberId};
use crate::money::Money;
use log::debug;
use std::collections::BTreeMap;

/// Per-member item costs for one bill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Allocated cost per member. Members with no assigned items are absent.
    pub costs: BTreeMap<MemberId, Money>,

    /// Items with nobody assigned, in bill order.
    pub unassigned: Vec<ItemId>,
}

impl Allocation {
    /// Allocated cost for a member, zero if they were assigned nothing.
    pub fn cost_for(&self, member: &MemberId) -> Money {
        self.costs.get(member).copied().unwrap_or(Money::ZERO)
    }

    /// Sum of every member's allocated cost.
    pub fn total(&self) -> Money {
        self.costs.values().sum()
    }
}

/// Splits each item's extended price evenly between its assignees.
///
/// Shares are exact to the unit: leftover ten-thousandths go to the
/// assignees with the lowest member ids, so the shares of an item always add
/// up to its extended price. Unassigned items are collected, not charged.
pub fn allocate(bill: &Bill) -> Allocation {
    let mut allocation = Allocation::default();

    for item in &bill.items {
        let assignees = match bill.assignment_for(&item.id) {
            Some(assignment) if !assignment.is_empty() => &assignment.members,
            _ => {
                debug!("Item {} has no assignees", item.id);
                allocation.unassigned.push(item.id.clone());
                continue;
            }
        };

        let shares = item.extended_price().split_evenly(assignees.len());
        for (member, share) in assignees.iter().zip(shares) {
            *allocation.costs.entry(member.clone()).or_default() += share;
        }
    }

    allocation
}
