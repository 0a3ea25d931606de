//! Tests for the balance aggregator and debt matrix
//!
//! Scenario fixtures follow the weekend-trip shape: hotel paid by Alice,
//! dinner by Bob, gas by Charlie, everything split equally.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitledger_core::{calculate_group_balances, Expense, ExpenseSplit, User};

fn user(id: &str, name: &str) -> User {
    User::new(id, Some(name.to_string()), format!("{id}@example.com"))
}

fn expense(id: &str, total: Decimal, paid_by: &str, shares: &[(&str, Decimal)]) -> Expense {
    Expense {
        id: id.to_string(),
        total_amount: total,
        currency: "USD".to_string(),
        paid_by: paid_by.to_string(),
        splits: shares
            .iter()
            .map(|(user_id, amount)| ExpenseSplit {
                user_id: user_id.to_string(),
                amount: *amount,
            })
            .collect(),
    }
}

fn trip_users() -> Vec<User> {
    vec![
        user("alice", "Alice"),
        user("bob", "Bob"),
        user("charlie", "Charlie"),
    ]
}

fn trip_expenses() -> Vec<Expense> {
    vec![
        expense(
            "hotel",
            dec!(300),
            "alice",
            &[
                ("alice", dec!(100)),
                ("bob", dec!(100)),
                ("charlie", dec!(100)),
            ],
        ),
        expense(
            "dinner",
            dec!(150),
            "bob",
            &[("alice", dec!(50)), ("bob", dec!(50)), ("charlie", dec!(50))],
        ),
        expense(
            "gas",
            dec!(90),
            "charlie",
            &[("alice", dec!(30)), ("bob", dec!(30)), ("charlie", dec!(30))],
        ),
    ]
}

#[test]
fn trip_scenario_net_balances() {
    let summary = calculate_group_balances("g1", "Weekend Trip", &trip_expenses(), &trip_users());

    assert_eq!(summary.group_id, "g1");
    assert_eq!(summary.group_name, "Weekend Trip");
    assert_eq!(summary.total_expenses, dec!(540));
    assert!(!summary.is_settled);

    let alice = &summary.user_balances[0];
    assert_eq!(alice.net_balance, dec!(120));
    assert_eq!(alice.total_owed, dec!(120));
    assert_eq!(alice.total_owing, Decimal::ZERO);

    let bob = &summary.user_balances[1];
    assert_eq!(bob.net_balance, dec!(-30));
    assert_eq!(bob.total_owed, Decimal::ZERO);
    assert_eq!(bob.total_owing, dec!(30));

    let charlie = &summary.user_balances[2];
    assert_eq!(charlie.net_balance, dec!(-90));
    assert_eq!(charlie.total_owing, dec!(90));
}

#[test]
fn trip_scenario_settlement_plan() {
    let summary = calculate_group_balances("g1", "Weekend Trip", &trip_expenses(), &trip_users());

    // Exactly two payments, both directed to Alice, totaling 120
    assert_eq!(summary.optimized_payments.len(), 2);
    for payment in &summary.optimized_payments {
        assert_eq!(payment.to_user_id, "alice");
    }
    let total: Decimal = summary.optimized_payments.iter().map(|p| p.amount).sum();
    assert_eq!(total, dec!(120));

    // Largest debtor pays first
    assert_eq!(summary.optimized_payments[0].from_user_id, "charlie");
    assert_eq!(summary.optimized_payments[0].amount, dec!(90));
    assert_eq!(summary.optimized_payments[1].from_user_id, "bob");
    assert_eq!(summary.optimized_payments[1].amount, dec!(30));
}

#[test]
fn conservation_of_money() {
    let summary = calculate_group_balances("g1", "Weekend Trip", &trip_expenses(), &trip_users());

    let net_total: Decimal = summary.user_balances.iter().map(|b| b.net_balance).sum();
    assert_eq!(net_total, Decimal::ZERO);
}

#[test]
fn debt_matrix_is_gross_and_directional() {
    let summary = calculate_group_balances("g1", "Weekend Trip", &trip_expenses(), &trip_users());

    // Every non-payer share appears as its own directed row: 3 expenses
    // x 2 non-payer participants each. Opposing directions are not netted.
    assert_eq!(summary.debt_relationships.len(), 6);

    let bob_to_alice = summary
        .debt_relationships
        .iter()
        .find(|d| d.from_user_id == "bob" && d.to_user_id == "alice")
        .unwrap();
    assert_eq!(bob_to_alice.amount, dec!(100));

    let alice_to_bob = summary
        .debt_relationships
        .iter()
        .find(|d| d.from_user_id == "alice" && d.to_user_id == "bob")
        .unwrap();
    assert_eq!(alice_to_bob.amount, dec!(50));
}

#[test]
fn debt_matrix_collapses_repeat_pairs() {
    let users = vec![user("alice", "Alice"), user("bob", "Bob")];
    let expenses = vec![
        expense("e1", dec!(10), "alice", &[("bob", dec!(10))]),
        expense("e2", dec!(15), "alice", &[("bob", dec!(15))]),
    ];

    let summary = calculate_group_balances("g1", "Pair", &expenses, &users);

    assert_eq!(summary.debt_relationships.len(), 1);
    assert_eq!(summary.debt_relationships[0].amount, dec!(25));
}

#[test]
fn sole_participant_payer_is_settled() {
    // Payer is also the only participant: net zero, nothing to settle
    let users = vec![user("alice", "Alice")];
    let expenses = vec![expense("solo", dec!(42), "alice", &[("alice", dec!(42))])];

    let summary = calculate_group_balances("g1", "Solo", &expenses, &users);

    assert_eq!(summary.user_balances[0].net_balance, Decimal::ZERO);
    assert!(summary.optimized_payments.is_empty());
    assert!(summary.debt_relationships.is_empty());
    assert!(summary.is_settled);
}

#[test]
fn empty_group_is_settled() {
    let summary = calculate_group_balances("g1", "Empty", &[], &trip_users());

    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert!(summary.is_settled);
    assert!(summary.optimized_payments.is_empty());
    for balance in &summary.user_balances {
        assert_eq!(balance.net_balance, Decimal::ZERO);
    }
}

#[test]
fn unknown_user_references_are_dropped() {
    let users = vec![user("alice", "Alice"), user("bob", "Bob")];
    // Half the hotel is attributed to someone who is not a member
    let expenses = vec![expense(
        "hotel",
        dec!(100),
        "alice",
        &[("alice", dec!(50)), ("ghost", dec!(50))],
    )];

    let summary = calculate_group_balances("g1", "Gap", &expenses, &users);

    // Ghost's share vanishes from aggregation and from the debt matrix
    assert_eq!(summary.user_balances.len(), 2);
    assert_eq!(summary.user_balances[0].net_balance, dec!(50));
    assert_eq!(summary.user_balances[1].net_balance, Decimal::ZERO);
    assert!(summary.debt_relationships.is_empty());
}

#[test]
fn display_name_falls_back_to_email() {
    let users = vec![
        User::new("alice", None, "alice@example.com"),
        user("bob", "Bob"),
    ];
    let expenses = vec![expense(
        "e1",
        dec!(10),
        "alice",
        &[("alice", dec!(5)), ("bob", dec!(5))],
    )];

    let summary = calculate_group_balances("g1", "Names", &expenses, &users);

    assert_eq!(summary.user_balances[0].user_name, "alice@example.com");
    assert_eq!(summary.debt_relationships[0].to_user_name, "alice@example.com");
}

#[test]
fn output_is_tagged_with_the_expense_currency() {
    let users = vec![user("alice", "Alice"), user("bob", "Bob")];
    let mut e = expense("e1", dec!(10), "alice", &[("alice", dec!(5)), ("bob", dec!(5))]);
    e.currency = "EUR".to_string();

    let summary = calculate_group_balances("g1", "Euros", &[e], &users);

    assert_eq!(summary.debt_relationships[0].currency, "EUR");
    assert_eq!(summary.optimized_payments[0].currency, "EUR");
}

#[test]
fn summary_serializes_with_camel_case_fields() {
    let summary = calculate_group_balances("g1", "Weekend Trip", &trip_expenses(), &trip_users());
    let json = serde_json::to_value(&summary).unwrap();

    assert!(json.get("userBalances").is_some());
    assert!(json.get("debtRelationships").is_some());
    assert!(json.get("optimizedPayments").is_some());
    assert!(json.get("isSettled").is_some());
    assert_eq!(json["totalExpenses"], serde_json::json!(540.0));
    assert!(json["userBalances"][0].get("netBalance").is_some());
}
