//! Ledger processing and report output.
//!
//! Applies ledger rows to a [`GroupStore`] in the order they are read, then
//! recomputes balances and settlements for every group from its full expense
//! history. Invalid rows are logged and skipped; they never abort processing.

use crate::balance::calculate_balances;
use crate::error::{Result, SplitError};
use crate::model::{Balances, Group, GroupId, Member, Settlement};
use crate::record::{LedgerEntry, LedgerRecord};
use crate::settlement::settle_balances;
use crate::store::{GroupStore, InMemoryStore};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Everything needed to render one group's balances page.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub group: Group,

    /// Members in join order.
    pub members: Vec<Member>,

    pub balances: Balances,

    /// Transfers in the order they were planned.
    pub settlements: Vec<Settlement>,
}

/// Reads a consistent snapshot of one group and computes its report.
pub fn group_report<S: GroupStore + ?Sized>(store: &S, group: GroupId) -> Result<GroupReport> {
    let info = store
        .group(group)
        .cloned()
        .ok_or(SplitError::UnknownGroup(group))?;
    let members = store.members(group)?;
    let expenses = store.expenses(group)?;

    let balances = calculate_balances(&members, &expenses)?;
    let settlements = settle_balances(&members, &balances)?;
    debug!(
        "Group {}: {} members, {} expenses, {} settlements",
        group,
        members.len(),
        expenses.len(),
        settlements.len()
    );

    Ok(GroupReport {
        group: info,
        members,
        balances,
        settlements,
    })
}

/// The expense ledger engine.
///
/// Owns the store that ledger rows are applied to. Output covers all groups
/// sorted by group id.
pub struct SplitEngine<S = InMemoryStore> {
    store: S,
}

impl SplitEngine<InMemoryStore> {
    /// Creates an engine backed by an empty in-memory store.
    pub fn new() -> Self {
        SplitEngine {
            store: InMemoryStore::new(),
        }
    }
}

impl Default for SplitEngine<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GroupStore> SplitEngine<S> {
    /// Creates an engine on top of an existing store.
    pub fn with_store(store: S) -> Self {
        SplitEngine { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies ledger rows from a CSV reader in streaming fashion.
    ///
    /// Invalid rows are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<LedgerRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Ok(entry) => {
                        if let Err(e) = self.apply(entry, row_num) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    }
                    Err(message) => {
                        warn!(
                            "{}",
                            SplitError::InvalidRecord {
                                row: row_num,
                                message
                            }
                        );
                    }
                },
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single parsed ledger entry to the store.
    pub fn apply(&mut self, entry: LedgerEntry, row: usize) -> Result<()> {
        match entry {
            LedgerEntry::Member { id, name } => {
                self.store.register_user(id, &name)?;
                debug!("Row {}: Registered user {} ({})", row, id, name);
            }
            LedgerEntry::Group {
                id,
                creator,
                name,
                description,
            } => {
                self.store.create_group(id, &name, &description, creator)?;
                debug!("Row {}: User {} created group {} ({})", row, creator, id, name);
            }
            LedgerEntry::Join { group, member } => {
                if self.store.join_group(group, member)? {
                    debug!("Row {}: User {} joined group {}", row, member, group);
                } else {
                    debug!(
                        "Row {}: User {} already in group {}, ignoring",
                        row, member, group
                    );
                }
            }
            LedgerEntry::Expense {
                group,
                payer,
                amount,
                description,
            } => {
                let id = self.store.add_expense(group, payer, amount, &description)?;
                debug!(
                    "Row {}: Expense {} of {} paid by {} in group {}",
                    row, id, amount, payer, group
                );
            }
        }

        Ok(())
    }

    /// Computes the report for every group, in ascending group id order.
    pub fn reports(&self) -> Result<Vec<GroupReport>> {
        self.store
            .group_ids()
            .into_iter()
            .map(|id| group_report(&self.store, id))
            .collect()
    }

    /// Writes every planned transfer as CSV.
    ///
    /// Rows follow group id order, then planning order within a group.
    pub fn write_settlements<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["group", "from", "to", "amount"])?;

        for report in self.reports()? {
            for settlement in &report.settlements {
                csv_writer.write_record([
                    report.group.id.to_string(),
                    settlement.from.name.clone(),
                    settlement.to.name.clone(),
                    settlement.amount.to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes every member's balance as CSV, members in join order.
    pub fn write_balances<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["group", "member", "name", "balance"])?;

        for report in self.reports()? {
            for member in &report.members {
                let balance = report.balances.get(&member.id).copied().unwrap_or_default();
                csv_writer.write_record([
                    report.group.id.to_string(),
                    member.id.to_string(),
                    member.name.clone(),
                    balance.to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
