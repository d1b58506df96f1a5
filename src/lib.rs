//! # SplitStack
//!
//! Shared expense tracking for groups: computes each member's balance and the
//! transfers that settle the group.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: `rust_decimal` amounts, rounded to cents half-to-even
//!   only for the fair share and each final balance
//! - **Pure core**: [`calculate_balances`] and [`settle_balances`] take
//!   immutable snapshots and hold no state between calls
//! - **Recompute on demand**: balances always come from the full expense history
//! - **Deterministic output**: settlements follow member join order
//!
//! ## Example
//!
//! ```
//! use splitstack::{calculate_balances, settle_balances, Expense, Member, Money};
//! use std::str::FromStr;
//!
//! let members = vec![Member::new(1, "A"), Member::new(2, "B"), Member::new(3, "C")];
//! let expenses = vec![Expense::new(1, 1, Money::from_str("90").unwrap())];
//!
//! let balances = calculate_balances(&members, &expenses).unwrap();
//! let settlements = settle_balances(&members, &balances).unwrap();
//!
//! let rendered: Vec<String> = settlements.iter().map(|s| s.to_string()).collect();
//! assert_eq!(rendered, vec!["B -> A: 30.00", "C -> A: 30.00"]);
//! ```

pub mod balance;
pub mod engine;
pub mod error;
pub mod model;
pub mod money;
pub mod record;
pub mod settlement;
pub mod store;

pub use balance::calculate_balances;
pub use engine::{group_report, GroupReport, SplitEngine};
pub use error::{Result, SplitError};
pub use model::{Balances, Expense, Group, GroupId, Member, MemberId, Settlement};
pub use money::Money;
pub use record::{LedgerEntry, LedgerRecord};
pub use settlement::settle_balances;
pub use store::{GroupStore, InMemoryStore};
