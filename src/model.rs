//! Group, member, expense and settlement models.

use crate::money::Money;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Unique user identifier.
pub type MemberId = u32;

/// Unique group identifier.
pub type GroupId = u32;

/// Net position per member: positive is owed money, negative owes money.
pub type Balances = HashMap<MemberId, Money>;

/// A user as seen by one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Member {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A group of users sharing expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,

    /// User who created the group. Always its first member.
    pub created_by: MemberId,
}

/// A recorded expense, split equally among all current group members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// Assigned by the store in insertion order.
    pub id: u32,
    pub group: GroupId,
    pub payer: MemberId,

    /// Non-negative; validated when the expense is recorded.
    pub amount: Money,
    pub description: String,
}

impl Expense {
    /// Builds an expense outside of a store, with id 0.
    pub fn new(group: GroupId, payer: MemberId, amount: Money) -> Self {
        Expense {
            id: 0,
            group,
            payer,
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A single recommended payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub from: Member,
    pub to: Member,

    /// Positive, rounded to cents.
    pub amount: Money,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_settlement_display() {
        let settlement = Settlement {
            from: Member::new(2, "Bob"),
            to: Member::new(1, "Alice"),
            amount: Money::from_str("30").unwrap(),
        };
        assert_eq!(settlement.to_string(), "Bob -> Alice: 30.00");
    }

    #[test]
    fn test_expense_builder() {
        let expense =
            Expense::new(7, 1, Money::from_str("12.5").unwrap()).with_description("Taxi");
        assert_eq!(expense.id, 0);
        assert_eq!(expense.group, 7);
        assert_eq!(expense.payer, 1);
        assert_eq!(expense.description, "Taxi");
    }
}
