//! Ledger records for CSV parsing and their typed representation.

use crate::model::{GroupId, MemberId};
use crate::money::Money;
use serde::Deserialize;
use std::str::FromStr;

/// Raw ledger row as read from CSV.
///
/// All fields except `type` are optional at this level; which ones are
/// required depends on the row type and is checked by [`LedgerRecord::parse`].
#[derive(Debug, Deserialize)]
pub struct LedgerRecord {
    /// Row type: member, group, join, expense
    #[serde(rename = "type")]
    pub kind: String,

    pub group: Option<GroupId>,

    pub member: Option<MemberId>,

    /// User name for `member` rows, group name for `group` rows
    pub name: Option<String>,

    /// Expense amount, kept as text so bad values can be reported per row
    pub amount: Option<String>,

    pub description: Option<String>,
}

impl LedgerRecord {
    /// Parses the raw CSV row into a typed ledger entry.
    ///
    /// Returns a message describing the problem if the row is unusable.
    pub fn parse(&self) -> Result<LedgerEntry, String> {
        let kind = self.kind.trim().to_lowercase();

        match kind.as_str() {
            "member" => Ok(LedgerEntry::Member {
                id: self.require_member()?,
                name: self.require_name()?,
            }),
            "group" => Ok(LedgerEntry::Group {
                id: self.require_group()?,
                creator: self.require_member()?,
                name: self.require_name()?,
                description: self.description(),
            }),
            "join" => Ok(LedgerEntry::Join {
                group: self.require_group()?,
                member: self.require_member()?,
            }),
            "expense" => Ok(LedgerEntry::Expense {
                group: self.require_group()?,
                payer: self.require_member()?,
                amount: self.parse_amount()?,
                description: self.description(),
            }),
            other => Err(format!("unknown record type '{}'", other)),
        }
    }

    fn require_group(&self) -> Result<GroupId, String> {
        self.group.ok_or_else(|| "missing group".to_string())
    }

    fn require_member(&self) -> Result<MemberId, String> {
        self.member.ok_or_else(|| "missing member".to_string())
    }

    fn require_name(&self) -> Result<String, String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err("missing name".to_string()),
        }
    }

    fn description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }

    /// Parses the amount field, rejecting empty, non-numeric and negative values.
    fn parse_amount(&self) -> Result<Money, String> {
        let raw = self.amount.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err("missing amount".to_string());
        }

        let amount =
            Money::from_str(raw).map_err(|e| format!("invalid amount '{}': {}", raw, e))?;
        if amount.is_negative() {
            return Err(format!("negative amount {}", raw));
        }
        Ok(amount)
    }
}

/// A parsed and validated ledger row ready to be applied to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    /// Register a user.
    Member { id: MemberId, name: String },

    /// Create a group; the creator joins it.
    Group {
        id: GroupId,
        creator: MemberId,
        name: String,
        description: String,
    },

    /// Add a user to an existing group.
    Join { group: GroupId, member: MemberId },

    /// Record an expense split equally among the group.
    Expense {
        group: GroupId,
        payer: MemberId,
        amount: Money,
        description: String,
    },
}
