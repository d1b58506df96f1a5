//! Storage of users, groups, memberships and expenses.
//!
//! The balance and settlement functions never touch a store; callers read a
//! consistent `(members, expenses)` snapshot through [`GroupStore`] and pass
//! it in. Validation of user input happens here, at the data-entry boundary.

use crate::error::{Result, SplitError};
use crate::model::{Expense, Group, GroupId, Member, MemberId};
use crate::money::Money;
use std::collections::{BTreeMap, HashMap};

/// Data-access interface for the group expense records.
pub trait GroupStore {
    /// Registers a user under a unique id.
    fn register_user(&mut self, id: MemberId, name: &str) -> Result<()>;

    /// Creates a group. The creator becomes its first member.
    fn create_group(
        &mut self,
        id: GroupId,
        name: &str,
        description: &str,
        creator: MemberId,
    ) -> Result<()>;

    /// Adds a user to a group. Returns `false` if they already belonged to it.
    fn join_group(&mut self, group: GroupId, member: MemberId) -> Result<bool>;

    /// Records an expense paid by a current member and returns its id.
    ///
    /// Rejects negative amounts and payers outside the group.
    fn add_expense(
        &mut self,
        group: GroupId,
        payer: MemberId,
        amount: Money,
        description: &str,
    ) -> Result<u32>;

    fn group(&self, id: GroupId) -> Option<&Group>;

    /// All group ids in ascending order.
    fn group_ids(&self) -> Vec<GroupId>;

    /// Groups the user belongs to, in ascending id order.
    fn groups_of(&self, member: MemberId) -> Result<Vec<GroupId>>;

    /// Members of a group in the order they joined.
    fn members(&self, group: GroupId) -> Result<Vec<Member>>;

    /// Expenses of a group ordered by id.
    fn expenses(&self, group: GroupId) -> Result<Vec<Expense>>;
}

/// A [`GroupStore`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<MemberId, String>,
    groups: BTreeMap<GroupId, Group>,

    /// Member ids per group, in join order.
    memberships: HashMap<GroupId, Vec<MemberId>>,

    /// All expenses in insertion (and therefore id) order.
    expenses: Vec<Expense>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_user(&self, id: MemberId) -> Result<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(SplitError::UnknownUser(id))
        }
    }

    fn group_members(&self, group: GroupId) -> Result<&Vec<MemberId>> {
        self.memberships
            .get(&group)
            .ok_or(SplitError::UnknownGroup(group))
    }
}

impl GroupStore for InMemoryStore {
    fn register_user(&mut self, id: MemberId, name: &str) -> Result<()> {
        if self.users.contains_key(&id) {
            return Err(SplitError::DuplicateUser(id));
        }
        self.users.insert(id, name.to_string());
        Ok(())
    }

    fn create_group(
        &mut self,
        id: GroupId,
        name: &str,
        description: &str,
        creator: MemberId,
    ) -> Result<()> {
        if self.groups.contains_key(&id) {
            return Err(SplitError::DuplicateGroup(id));
        }
        self.require_user(creator)?;

        self.groups.insert(
            id,
            Group {
                id,
                name: name.to_string(),
                description: description.to_string(),
                created_by: creator,
            },
        );
        self.memberships.insert(id, vec![creator]);
        Ok(())
    }

    fn join_group(&mut self, group: GroupId, member: MemberId) -> Result<bool> {
        self.require_user(member)?;
        let members = self
            .memberships
            .get_mut(&group)
            .ok_or(SplitError::UnknownGroup(group))?;

        if members.contains(&member) {
            return Ok(false);
        }
        members.push(member);
        Ok(true)
    }

    fn add_expense(
        &mut self,
        group: GroupId,
        payer: MemberId,
        amount: Money,
        description: &str,
    ) -> Result<u32> {
        if !self.group_members(group)?.contains(&payer) {
            return Err(SplitError::NotAMember {
                group,
                member: payer,
            });
        }
        if amount.is_negative() {
            return Err(SplitError::NegativeAmount { payer, amount });
        }

        let id = self.expenses.len() as u32 + 1;
        self.expenses.push(Expense {
            id,
            group,
            payer,
            amount,
            description: description.to_string(),
        });
        Ok(id)
    }

    fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }

    fn groups_of(&self, member: MemberId) -> Result<Vec<GroupId>> {
        self.require_user(member)?;
        Ok(self
            .groups
            .keys()
            .filter(|id| {
                self.memberships
                    .get(*id)
                    .is_some_and(|members| members.contains(&member))
            })
            .copied()
            .collect())
    }

    fn members(&self, group: GroupId) -> Result<Vec<Member>> {
        self.group_members(group)?
            .iter()
            .map(|id| {
                self.users
                    .get(id)
                    .map(|name| Member::new(*id, name.as_str()))
                    .ok_or(SplitError::UnknownUser(*id))
            })
            .collect()
    }

    fn expenses(&self, group: GroupId) -> Result<Vec<Expense>> {
        self.group_members(group)?;
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.group == group)
            .cloned()
            .collect())
    }
}
