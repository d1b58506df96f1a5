//! Error types for SplitStack.

use crate::model::{GroupId, MemberId};
use crate::money::Money;
use thiserror::Error;

/// Result type alias for SplitStack operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while recording expenses or computing settlements.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid ledger record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: splitstack <ledger.csv> [--balances]")]
    MissingArgument,

    /// Unrecognized command-line argument
    #[error("Unknown argument '{0}'. Usage: splitstack <ledger.csv> [--balances]")]
    UnknownArgument(String),

    /// An expense with a negative amount reached the calculator
    #[error("Expense paid by member {payer} has negative amount {amount}")]
    NegativeAmount { payer: MemberId, amount: Money },

    /// Summing expense amounts exceeded the representable range
    #[error("Expense amounts are too large to add up")]
    AmountOverflow,

    /// An expense payer is not among the group's members
    #[error("Expense payer {0} is not a member of the group")]
    UnknownPayer(MemberId),

    /// The member list contains the same id twice
    #[error("Member {0} appears more than once")]
    DuplicateMember(MemberId),

    /// A member has no entry in the balances mapping
    #[error("No balance for member {0}")]
    MissingBalance(MemberId),

    /// The balances mapping references someone outside the member list
    #[error("Balance given for member {0} who is not in the member list")]
    UnknownBalance(MemberId),

    /// No registered user with this id
    #[error("Unknown user {0}")]
    UnknownUser(MemberId),

    /// No group with this id
    #[error("Unknown group {0}")]
    UnknownGroup(GroupId),

    /// User id already registered
    #[error("User {0} already registered")]
    DuplicateUser(MemberId),

    /// Group id already taken
    #[error("Group {0} already exists")]
    DuplicateGroup(GroupId),

    /// Operation requires group membership
    #[error("User {member} is not a member of group {group}")]
    NotAMember { group: GroupId, member: MemberId },
}
