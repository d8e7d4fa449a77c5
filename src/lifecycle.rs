//! Bill lifecycle: `Pending` until collection is confirmed, then `Paid` for good.
//!
//! A [`BillRecord`] owns a bill together with the split last computed for
//! it. While pending, rates and assignments may change and the split is
//! recomputed on demand. Marking the bill paid freezes the split; every later
//! mutation is rejected with [`SplitError::BillPaid`].

use crate::engine::{compute_splits, SplitOutcome};
use crate::error::{Result, SplitError};
use crate::model::{Assignment, Bill, BillStatus, ItemId, Member, MemberId};
use log::info;
use rust_decimal::Decimal;

/// A bill and its stored split.
#[derive(Debug, Clone)]
pub struct BillRecord {
    bill: Bill,
    outcome: Option<SplitOutcome>,
}

impl BillRecord {
    /// Wraps a bill. A bill that arrives already paid has no stored split and
    /// can never get one.
    pub fn new(bill: Bill) -> Self {
        BillRecord {
            bill,
            outcome: None,
        }
    }

    /// Restores a paid bill together with the split stored when it was paid.
    pub fn restore_paid(mut bill: Bill, outcome: SplitOutcome) -> Self {
        bill.status = BillStatus::Paid;
        BillRecord {
            bill,
            outcome: Some(outcome),
        }
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn status(&self) -> BillStatus {
        self.bill.status
    }

    /// The split last computed or frozen for this bill.
    pub fn outcome(&self) -> Option<&SplitOutcome> {
        self.outcome.as_ref()
    }

    /// Replaces the fee and discount rates. Invalidates the stored split.
    pub fn set_rates(
        &mut self,
        platform_fee_percent: Decimal,
        discount_percent: Decimal,
    ) -> Result<()> {
        self.ensure_pending()?;
        self.bill.platform_fee_percent = platform_fee_percent;
        self.bill.discount_percent = discount_percent;
        self.outcome = None;
        Ok(())
    }

    /// Adds or removes one member on an item.
    pub fn toggle_assignment(&mut self, item_id: &ItemId, member: &MemberId) -> Result<()> {
        self.ensure_pending()?;
        self.assignment_mut(item_id)?.toggle(member);
        self.outcome = None;
        Ok(())
    }

    /// Assigns every group member to an item.
    pub fn assign_all(&mut self, item_id: &ItemId, members: &[Member]) -> Result<()> {
        self.ensure_pending()?;
        self.assignment_mut(item_id)?.assign_all(members);
        self.outcome = None;
        Ok(())
    }

    /// Removes every member from an item.
    pub fn clear_assignment(&mut self, item_id: &ItemId) -> Result<()> {
        self.ensure_pending()?;
        self.assignment_mut(item_id)?.clear();
        self.outcome = None;
        Ok(())
    }

    /// Computes the split from the current rates and assignments and stores it.
    pub fn recompute(&mut self, members: &[Member]) -> Result<&SplitOutcome> {
        self.ensure_pending()?;
        let outcome = compute_splits(&self.bill, members)?;
        Ok(&*self.outcome.insert(outcome))
    }

    /// Freezes the split and moves the bill to `Paid`.
    ///
    /// The split is recomputed one last time so the frozen values match the
    /// bill as it stands at the moment of payment.
    pub fn mark_paid(&mut self, members: &[Member]) -> Result<&SplitOutcome> {
        self.ensure_pending()?;
        let outcome = compute_splits(&self.bill, members)?;
        self.bill.status = BillStatus::Paid;
        info!(
            "Bill marked paid: collected {} against invoice total {}",
            outcome.total_final(),
            outcome.total_extracted()
        );
        Ok(&*self.outcome.insert(outcome))
    }

    fn ensure_pending(&self) -> Result<()> {
        if self.bill.is_paid() {
            return Err(SplitError::BillPaid);
        }
        Ok(())
    }

    /// Finds the assignment for an item, creating an empty one for items
    /// that have none yet.
    fn assignment_mut(&mut self, item_id: &ItemId) -> Result<&mut Assignment> {
        if !self.bill.items.iter().any(|item| &item.id == item_id) {
            return Err(SplitError::UnknownItem {
                item: item_id.clone(),
            });
        }

        if self.bill.assignment_for(item_id).is_none() {
            self.bill
                .assignments
                .push(Assignment::unassigned(item_id.clone()));
        }

        self.bill
            .assignment_for_mut(item_id)
            .ok_or_else(|| SplitError::UnknownItem {
                item: item_id.clone(),
            })
    }
}
