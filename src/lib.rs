//! # Split Engine
//!
//! Splits an itemized bill across the members of a group. Each item's price
//! is shared evenly by the members assigned to it; every member then pays a
//! platform fee on their share, spends any free cash they hold, and gets a
//! discount on what remains.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 4 decimal places via `rust_decimal`, cents
//!   only at presentation
//! - **Exact allocation**: item shares always add up to the item price
//! - **Pure recomputation**: no state between runs, identical inputs give
//!   identical outputs
//! - **Visible shortfalls**: unassigned items are reported, never dropped
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use split_engine::{compute_splits, Assignment, Bill, Item, Member, Money};
//! use std::str::FromStr;
//!
//! let mut bill = Bill::new(
//!     vec![Item::new("pasta", "Pasta", Money::from_str("30").unwrap(), 1)],
//!     Decimal::TEN,
//!     Decimal::ZERO,
//! );
//! bill.assignments = vec![Assignment::new("pasta", ["ana", "ben"])];
//!
//! let members = vec![
//!     Member::new("ana", "Ana", Money::ZERO),
//!     Member::new("ben", "Ben", Money::ZERO),
//! ];
//!
//! let outcome = compute_splits(&bill, &members).unwrap();
//! assert_eq!(outcome.splits[0].final_payable.to_display_string(), "16.50");
//! assert_eq!(outcome.total_final().to_display_string(), "33.00");
//! ```

pub mod allocator;
pub mod applier;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod money;
pub mod rate;
pub mod reconciler;
pub mod records;
pub mod report;

pub use allocator::{allocate, Allocation};
pub use applier::apply;
pub use engine::{compute_splits, SplitOutcome};
pub use error::{Result, SplitError};
pub use lifecycle::BillRecord;
pub use model::{Assignment, Bill, BillStatus, Item, ItemId, Member, MemberId, PersonSplit};
pub use money::Money;
pub use rate::Percent;
pub use reconciler::{reconcile, Reconciliation, VarianceKind};
