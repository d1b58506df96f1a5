//! Settlement planning.
//!
//! Greedy two-pointer matching of debtors against creditors. For net
//! balances in a single currency this yields at most `members - 1` transfers.

use crate::error::{Result, SplitError};
use crate::model::{Balances, Member, Settlement};
use crate::money::Money;
use log::debug;
use std::collections::HashSet;

/// A member together with the amount still to pay or receive.
type Position<'a> = (&'a Member, Money);

/// Produces the ordered list of transfers that zero out `balances`.
///
/// Debtors and creditors keep their relative order from `members`, so the
/// result is deterministic for a given member order. Members with a zero
/// balance take part in no transfer.
///
/// Transfers that round to less than a cent are not emitted, so every
/// settlement amount is positive.
///
/// Rounding residue is tolerated: when the balances do not sum to exactly
/// zero, matching stops as soon as one side runs out, leaving at most a cent
/// per member unsettled.
///
/// # Errors
///
/// Every member must have a balance and every balance must belong to a
/// member; otherwise `MissingBalance` or `UnknownBalance` is returned.
pub fn settle_balances(members: &[Member], balances: &Balances) -> Result<Vec<Settlement>> {
    let mut known = HashSet::with_capacity(members.len());
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for member in members {
        if !known.insert(member.id) {
            return Err(SplitError::DuplicateMember(member.id));
        }
        let balance = *balances
            .get(&member.id)
            .ok_or(SplitError::MissingBalance(member.id))?;

        if balance.is_negative() {
            debtors.push((member, -balance));
        } else if balance.is_positive() {
            creditors.push((member, balance));
        }
    }

    if let Some(stray) = balances.keys().find(|id| !known.contains(*id)) {
        return Err(SplitError::UnknownBalance(*stray));
    }

    Ok(match_positions(debtors, creditors))
}

/// Walks both lists with one cursor each, paying the smaller outstanding
/// amount and advancing whichever side reaches exactly zero.
fn match_positions(
    mut debtors: Vec<Position<'_>>,
    mut creditors: Vec<Position<'_>>,
) -> Vec<Settlement> {
    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let pay = debtors[i].1.min(creditors[j].1);

        if pay.is_zero() {
            // An exhausted position slipped in; skip it without emitting.
            debug!(
                "Skipping zero transfer between {} and {}",
                debtors[i].0, creditors[j].0
            );
        } else {
            let amount = pay.round_cents();
            if amount.is_zero() {
                debug!(
                    "Transfer of {:?} from {} to {} rounds to zero, not emitted",
                    pay, debtors[i].0, creditors[j].0
                );
            } else {
                settlements.push(Settlement {
                    from: debtors[i].0.clone(),
                    to: creditors[j].0.clone(),
                    amount,
                });
            }
            // pay never exceeds either remaining amount
            debtors[i].1 -= pay;
            creditors[j].1 -= pay;
        }

        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    let residue = debtors[i..]
        .iter()
        .chain(&creditors[j..])
        .try_fold(Money::ZERO, |acc, (_, remaining)| acc.checked_add(*remaining));
    if let Some(residue) = residue.filter(|r| !r.is_zero()) {
        debug!("Rounding residue of {} left unsettled", residue);
    }

    settlements
}
