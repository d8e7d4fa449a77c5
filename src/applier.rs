//! Turns a member's allocated cost into what they finally pay.
//!
//! The order is fixed: platform fee first, then free cash, then the discount
//! on whatever is left.

use crate::model::{Member, PersonSplit};
use crate::money::Money;
use crate::rate::Percent;
use log::{debug, warn};

/// Credit available to a member, with negative balances clamped to zero.
pub fn usable_credit(member: &Member) -> Money {
    if member.free_cash.is_negative() {
        warn!(
            "Member {} has negative free cash {}, treating it as 0",
            member.id, member.free_cash
        );
        return Money::ZERO;
    }
    member.free_cash
}

/// Applies fee, credit and discount to one member's allocated cost.
pub fn apply(
    member: &Member,
    actual_cost: Money,
    platform_fee_percent: Percent,
    discount_percent: Percent,
) -> PersonSplit {
    let platform_fee = actual_cost.percent_of(platform_fee_percent);
    let cost_before_credit = actual_cost + platform_fee;

    let free_cash_used = usable_credit(member).min(cost_before_credit);
    let amount_after_credit = cost_before_credit - free_cash_used;

    let discount = amount_after_credit.percent_of(discount_percent);
    let final_payable = (amount_after_credit - discount).max(Money::ZERO);

    debug!(
        "Member {}: cost {} + fee {} - credit {} - discount {} = {}",
        member.id, actual_cost, platform_fee, free_cash_used, discount, final_payable
    );

    PersonSplit {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        actual_cost,
        platform_fee,
        free_cash_used,
        discount,
        final_payable,
    }
}
