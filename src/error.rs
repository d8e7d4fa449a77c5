//! Error types for the split engine.

use crate::model::{ItemId, MemberId};
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while computing or managing a split.
///
/// Malformed rates and negative credit are not errors; they are normalized
/// and logged. Only input that breaks the collaborator contract fails.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid CSV record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// The same member appears twice in the group
    #[error("Duplicate member ID {member}")]
    DuplicateMember { member: MemberId },

    /// The same item appears twice on the bill
    #[error("Duplicate item ID {item}")]
    DuplicateItem { item: ItemId },

    /// More than one assignment targets the same item
    #[error("Item {item} has more than one assignment")]
    DuplicateAssignment { item: ItemId },

    /// An assignment references an item that is not on the bill
    #[error("Assignment references unknown item {item}")]
    UnknownItem { item: ItemId },

    /// An assignment references someone outside the group
    #[error("Item {item} is assigned to unknown member {member}")]
    UnknownMember { item: ItemId, member: MemberId },

    /// An item with an unusable price or quantity
    #[error("Invalid item {item}: {message}")]
    InvalidItem { item: ItemId, message: String },

    /// The bill is paid and its split is frozen
    #[error("Bill is already paid; its split can no longer change")]
    BillPaid,

    /// Missing input file argument
    #[error("Missing input file argument. Usage: split-engine <items.csv> <members.csv> [fee_percent] [discount_percent]")]
    MissingArgument,
}
