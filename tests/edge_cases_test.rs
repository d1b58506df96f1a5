//! Scenario and property tests for balance calculation and settlement planning.
//!
//! Properties run over generated groups of up to eight members.

use proptest::prelude::*;
use splitstack::{
    calculate_balances, settle_balances, Balances, Expense, Member, MemberId, Money, Settlement,
};
use std::str::FromStr;

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn members(names: &[&str]) -> Vec<Member> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Member::new(i as MemberId + 1, *n))
        .collect()
}

fn plan(members: &[Member], expenses: &[Expense]) -> (Balances, Vec<Settlement>) {
    let balances = calculate_balances(members, expenses).unwrap();
    let settlements = settle_balances(members, &balances).unwrap();
    (balances, settlements)
}

fn render(settlements: &[Settlement]) -> Vec<String> {
    settlements.iter().map(|s| s.to_string()).collect()
}

/// Applies every transfer to the balances: the payer's debt shrinks and so
/// does the payee's credit.
fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut remaining = balances.clone();
    for s in settlements {
        *remaining.get_mut(&s.from.id).unwrap() += s.amount;
        *remaining.get_mut(&s.to.id).unwrap() -= s.amount;
    }
    remaining
}

/// One cent per member.
fn tolerance(member_count: usize) -> Money {
    (0..member_count).map(|_| money("0.01")).sum()
}

/// Builds a group from generated inputs. Amounts are in cents and payer
/// indexes wrap around the member count.
fn generated_group(
    member_count: usize,
    expense_count: usize,
    cents: &[u64],
    payer_indexes: &[usize],
) -> (Vec<Member>, Vec<Expense>) {
    let group: Vec<Member> = (0..member_count)
        .map(|i| Member::new(i as MemberId * 7 + 3, format!("M{}", i)))
        .collect();

    let expenses = (0..expense_count)
        .map(|idx| {
            let amount = *cents.get(idx).unwrap_or(&0);
            let payer_idx = payer_indexes.get(idx).copied().unwrap_or(0) % member_count;
            let amount = money(&format!("{}.{:02}", amount / 100, amount % 100));
            Expense::new(1, group[payer_idx].id, amount)
        })
        .collect();

    (group, expenses)
}

// ==================== SCENARIOS ====================

#[test]
fn test_empty_input() {
    let (balances, settlements) = plan(&[], &[]);
    assert!(balances.is_empty());
    assert!(settlements.is_empty());
}

#[test]
fn test_single_payer_multiple_members() {
    let group = members(&["A", "B", "C"]);
    let expenses = vec![Expense::new(1, 1, money("90"))];

    let (balances, settlements) = plan(&group, &expenses);
    assert_eq!(balances[&1], money("60"));
    assert_eq!(balances[&2], money("-30"));
    assert_eq!(balances[&3], money("-30"));
    assert_eq!(render(&settlements), vec!["B -> A: 30.00", "C -> A: 30.00"]);
}

#[test]
fn test_exact_pairwise_match() {
    let group = members(&["A", "B"]);
    let balances: Balances = [(1, money("-50")), (2, money("50"))].into_iter().collect();

    let settlements = settle_balances(&group, &balances).unwrap();
    assert_eq!(render(&settlements), vec!["A -> B: 50.00"]);
}

#[test]
fn test_three_way_chain() {
    let group = members(&["A", "B", "C"]);
    let balances: Balances = [(1, money("-20")), (2, money("5")), (3, money("15"))]
        .into_iter()
        .collect();

    let settlements = settle_balances(&group, &balances).unwrap();
    assert_eq!(render(&settlements), vec!["A -> B: 5.00", "A -> C: 15.00"]);
}

#[test]
fn test_rounding_residue_is_bounded() {
    let group = members(&["A", "B", "C"]);
    let expenses = vec![Expense::new(1, 1, money("100"))];

    let (balances, settlements) = plan(&group, &expenses);
    assert_eq!(render(&settlements), vec!["B -> A: 33.33", "C -> A: 33.33"]);

    let remaining = apply_settlements(&balances, &settlements);
    assert_eq!(remaining[&1], money("0.01"));
    assert!(remaining[&2].is_zero());
    assert!(remaining[&3].is_zero());
}

#[test]
fn test_everyone_paid_the_same() {
    let group = members(&["A", "B", "C"]);
    let expenses: Vec<Expense> = (1..=3).map(|p| Expense::new(1, p, money("25"))).collect();

    let (balances, settlements) = plan(&group, &expenses);
    assert!(balances.values().all(Money::is_zero));
    assert!(settlements.is_empty());
}

#[test]
fn test_single_member_owes_nothing() {
    let group = members(&["A"]);
    let expenses = vec![Expense::new(1, 1, money("12.34"))];

    let (balances, settlements) = plan(&group, &expenses);
    assert!(balances[&1].is_zero());
    assert!(settlements.is_empty());
}

#[test]
fn test_two_creditors_two_debtors() {
    let group = members(&["A", "B", "C", "D"]);
    let expenses = vec![
        Expense::new(1, 1, money("70")),
        Expense::new(1, 3, money("50")),
    ];

    // share 30: A +40, B -30, C +20, D -30
    let (_, settlements) = plan(&group, &expenses);
    assert_eq!(
        render(&settlements),
        vec!["B -> A: 30.00", "D -> A: 10.00", "D -> C: 20.00"]
    );
}

#[test]
fn test_member_order_drives_settlement_order() {
    let forward = members(&["A", "B", "C"]);
    let reversed: Vec<Member> = forward.iter().rev().cloned().collect();
    let expenses = vec![Expense::new(1, 2, money("90"))];

    let (_, first) = plan(&forward, &expenses);
    let (_, second) = plan(&reversed, &expenses);

    assert_eq!(render(&first), vec!["A -> B: 30.00", "C -> B: 30.00"]);
    assert_eq!(render(&second), vec!["C -> B: 30.00", "A -> B: 30.00"]);
}

// ==================== PROPERTIES ====================

proptest! {
    #[test]
    fn balances_sum_to_zero_within_tolerance(
        member_count in 1usize..=8,
        expense_count in 0usize..=12,
        cents in prop::collection::vec(0u64..=50_000, 0..=12),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=12),
    ) {
        let (group, expenses) =
            generated_group(member_count, expense_count, &cents, &payer_indexes);
        let balances = calculate_balances(&group, &expenses).unwrap();

        let sum: Money = balances.values().sum();
        prop_assert!(
            sum.abs() <= tolerance(group.len()),
            "sum {} out of bounds for {} members",
            sum,
            group.len()
        );
    }
}

proptest! {
    #[test]
    fn settlements_close_all_balances(
        member_count in 1usize..=8,
        expense_count in 0usize..=12,
        cents in prop::collection::vec(0u64..=50_000, 0..=12),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=12),
    ) {
        let (group, expenses) =
            generated_group(member_count, expense_count, &cents, &payer_indexes);
        let (balances, settlements) = plan(&group, &expenses);
        let remaining = apply_settlements(&balances, &settlements);

        let leftover: Money = remaining.values().map(|m| m.abs()).sum();
        prop_assert!(
            leftover <= tolerance(group.len()),
            "leftover {} after settling {:?}",
            leftover,
            balances
        );
    }
}

proptest! {
    #[test]
    fn no_member_pays_itself_and_amounts_are_positive(
        member_count in 1usize..=8,
        expense_count in 0usize..=12,
        cents in prop::collection::vec(0u64..=50_000, 0..=12),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=12),
    ) {
        let (group, expenses) =
            generated_group(member_count, expense_count, &cents, &payer_indexes);
        let (_, settlements) = plan(&group, &expenses);

        for s in &settlements {
            prop_assert_ne!(s.from.id, s.to.id);
            prop_assert!(s.amount.is_positive(), "non-positive transfer {}", s);
        }
    }
}

proptest! {
    #[test]
    fn transfer_count_is_below_member_count(
        member_count in 1usize..=8,
        expense_count in 0usize..=12,
        cents in prop::collection::vec(0u64..=50_000, 0..=12),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=12),
    ) {
        let (group, expenses) =
            generated_group(member_count, expense_count, &cents, &payer_indexes);
        let (_, settlements) = plan(&group, &expenses);
        prop_assert!(settlements.len() < group.len());
    }
}

proptest! {
    #[test]
    fn repeated_runs_are_identical(
        member_count in 1usize..=8,
        expense_count in 0usize..=12,
        cents in prop::collection::vec(0u64..=50_000, 0..=12),
        payer_indexes in prop::collection::vec(0usize..=7, 0..=12),
    ) {
        let (group, expenses) =
            generated_group(member_count, expense_count, &cents, &payer_indexes);
        let (first_balances, first) = plan(&group, &expenses);
        let (second_balances, second) = plan(&group, &expenses);
        prop_assert_eq!(first_balances, second_balances);
        prop_assert_eq!(first, second);
    }
}
