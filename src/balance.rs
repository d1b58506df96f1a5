//! Balance calculation.
//!
//! Every expense is split equally among all current members. A member's
//! balance is what they paid minus the fair share. The fair share and each
//! balance are rounded to cents once, half-to-even, so the balances of a group
//! sum to zero up to a rounding residue of at most one cent per member.

use crate::error::{Result, SplitError};
use crate::model::{Balances, Expense, Member, MemberId};
use crate::money::Money;
use log::debug;
use std::collections::HashMap;

/// Computes each member's net balance from the full expense history.
///
/// `members` must be the complete, deduplicated member list of one group and
/// `expenses` all expenses of that same group. An empty member list yields an
/// empty mapping.
///
/// # Errors
///
/// Fails fast on input-contract violations: a duplicated member, a negative
/// expense amount, or an expense paid by someone outside `members`. Amounts
/// whose sum leaves the decimal range yield `AmountOverflow`.
pub fn calculate_balances(members: &[Member], expenses: &[Expense]) -> Result<Balances> {
    let mut paid: HashMap<MemberId, Money> = HashMap::with_capacity(members.len());
    for member in members {
        if paid.insert(member.id, Money::ZERO).is_some() {
            return Err(SplitError::DuplicateMember(member.id));
        }
    }

    let mut total = Money::ZERO;
    for expense in expenses {
        if expense.amount.is_negative() {
            return Err(SplitError::NegativeAmount {
                payer: expense.payer,
                amount: expense.amount,
            });
        }
        let payer_total = paid
            .get_mut(&expense.payer)
            .ok_or(SplitError::UnknownPayer(expense.payer))?;
        *payer_total = payer_total
            .checked_add(expense.amount)
            .ok_or(SplitError::AmountOverflow)?;
        total = total
            .checked_add(expense.amount)
            .ok_or(SplitError::AmountOverflow)?;
    }

    if members.is_empty() {
        return Ok(Balances::new());
    }

    let share = total.split(members.len()).round_cents();
    debug!(
        "Total {} across {} members, fair share {}",
        total,
        members.len(),
        share
    );

    members
        .iter()
        .map(|m| {
            paid[&m.id]
                .checked_sub(share)
                .map(|balance| (m.id, balance.round_cents()))
                .ok_or(SplitError::AmountOverflow)
        })
        .collect()
}
