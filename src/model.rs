//! Bill, item, assignment and member records supplied by collaborators, plus
//! the per-member split the engine hands back.

use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a group member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

/// Identifier of a bill item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name::new(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(MemberId);
string_id!(ItemId);

/// A group member and their existing credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,

    /// Credit the member can spend on their share. Expected to be non-negative;
    /// a negative value is clamped to zero by the engine.
    pub free_cash: Money,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, free_cash: Money) -> Self {
        Member {
            id: MemberId::new(id),
            name: name.into(),
            free_cash,
        }
    }
}

/// A priced line on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Item {
            id: ItemId::new(id),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`.
    pub fn extended_price(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The members responsible for one item.
///
/// Members are kept in an ordered set, so duplicates collapse and iteration
/// order does not depend on the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub item_id: ItemId,
    pub members: BTreeSet<MemberId>,
}

impl Assignment {
    /// Creates an assignment with no members.
    pub fn unassigned(item_id: ItemId) -> Self {
        Assignment {
            item_id,
            members: BTreeSet::new(),
        }
    }

    pub fn new<I, M>(item_id: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Assignment {
            item_id: ItemId::new(item_id),
            members: members.into_iter().map(MemberId::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Adds the member if absent, removes it if present.
    pub fn toggle(&mut self, member: &MemberId) {
        if !self.members.remove(member) {
            self.members.insert(member.clone());
        }
    }

    /// Assigns every listed member, replacing the current set.
    pub fn assign_all(&mut self, members: &[Member]) {
        self.members = members.iter().map(|m| m.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

/// Lifecycle state of a bill. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
}

/// An itemized bill with its assignments and rates.
///
/// Rates are kept exactly as the collaborator stored them; they are only
/// normalized when a split is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub items: Vec<Item>,
    pub assignments: Vec<Assignment>,
    pub platform_fee_percent: Decimal,
    pub discount_percent: Decimal,
    pub status: BillStatus,
}

impl Bill {
    /// Creates a pending bill with an empty assignment for every item.
    pub fn new(items: Vec<Item>, platform_fee_percent: Decimal, discount_percent: Decimal) -> Self {
        let assignments = items
            .iter()
            .map(|item| Assignment::unassigned(item.id.clone()))
            .collect();

        Bill {
            items,
            assignments,
            platform_fee_percent,
            discount_percent,
            status: BillStatus::Pending,
        }
    }

    /// Returns `true` once the bill has been marked paid.
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    /// Sum of the extended prices of every item, assigned or not.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(Item::extended_price).sum()
    }

    pub fn assignment_for(&self, item_id: &ItemId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.item_id == item_id)
    }

    pub fn assignment_for_mut(&mut self, item_id: &ItemId) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| &a.item_id == item_id)
    }

    /// Items nobody is assigned to, in bill order.
    ///
    /// An item without any assignment record counts as unassigned.
    pub fn unassigned_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| self.assignment_for(&item.id).map_or(true, Assignment::is_empty))
            .collect()
    }
}

/// What one member owes for a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSplit {
    pub member_id: MemberId,
    pub member_name: String,

    /// Share of item prices before fee, credit and discount.
    pub actual_cost: Money,

    pub platform_fee: Money,

    /// Credit consumed. Never exceeds the member's credit or `actual_cost + platform_fee`.
    pub free_cash_used: Money,

    pub discount: Money,

    /// Amount the member pays. Never negative.
    pub final_payable: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn sample_bill() -> Bill {
        Bill::new(
            vec![
                Item::new("pizza", "Pizza", money("12.50"), 2),
                Item::new("soda", "Soda", money("2.25"), 4),
            ],
            Decimal::from_str("2.5").unwrap(),
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_extended_price() {
        let item = Item::new("pizza", "Pizza", money("12.50"), 2);
        assert_eq!(item.extended_price(), money("25"));
    }

    #[test]
    fn test_new_bill_is_pending_and_unassigned() {
        let bill = sample_bill();
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(!bill.is_paid());
        assert_eq!(bill.assignments.len(), 2);
        assert_eq!(bill.unassigned_items().len(), 2);
        assert_eq!(bill.subtotal(), money("34"));
    }

    #[test]
    fn test_assignment_toggle() {
        let alice = MemberId::from("alice");
        let mut assignment = Assignment::unassigned(ItemId::from("pizza"));

        assignment.toggle(&alice);
        assert!(assignment.members.contains(&alice));

        assignment.toggle(&alice);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_assign_all_and_clear() {
        let members = vec![
            Member::new("bob", "Bob", Money::ZERO),
            Member::new("alice", "Alice", Money::ZERO),
        ];
        let mut assignment = Assignment::new("pizza", ["carol"]);

        assignment.assign_all(&members);
        let ids: Vec<&str> = assignment.members.iter().map(MemberId::as_str).collect();
        assert_eq!(ids, vec!["alice", "bob"]);

        assignment.clear();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_unassigned_items_tracks_assignments() {
        let mut bill = sample_bill();
        bill.assignment_for_mut(&ItemId::from("pizza"))
            .unwrap()
            .toggle(&MemberId::from("alice"));

        let unassigned: Vec<&str> = bill
            .unassigned_items()
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(unassigned, vec!["soda"]);
    }

    #[test]
    fn test_missing_assignment_record_counts_as_unassigned() {
        let mut bill = sample_bill();
        bill.assignments.clear();
        assert_eq!(bill.unassigned_items().len(), 2);
    }

    #[test]
    fn test_assignment_dedupes_members() {
        let assignment = Assignment::new("pizza", ["alice", "alice", "bob"]);
        assert_eq!(assignment.members.len(), 2);
    }

    #[test]
    fn test_paid_status() {
        let mut bill = sample_bill();
        bill.status = BillStatus::Paid;
        assert!(bill.is_paid());
    }
}
