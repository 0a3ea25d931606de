//! Balance aggregator
//!
//! Entry point of the engine: folds expenses and splits into per-user net
//! positions, then derives the debt matrix and the settlement plan from
//! the same snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::debts::build_debt_relationships;
use crate::models::balance::{GroupBalanceSummary, UserBalance};
use crate::models::expense::{Expense, User};
use crate::settlement::optimizer::optimize_payments;
use crate::{DEFAULT_CURRENCY, SETTLEMENT_TOLERANCE};

/// Per-user paid/owed accumulator (exact decimals)
#[derive(Default)]
struct Position {
    paid: Decimal,
    owed: Decimal,
}

/// Compute the full balance summary for one group.
///
/// For each expense the payer is credited with the full total and every
/// split's user is debited with their share; a user's net balance is
/// paid minus owed. The summary also carries the gross debt matrix, the
/// optimized settlement plan, and the settled flag.
///
/// Splits or payers referencing a user absent from `users` contribute
/// nothing to the aggregation; each dropped reference is logged as a
/// warning (see [`crate::ledger::debts`] for the same rule on the debt
/// matrix).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use splitledger_core::{calculate_group_balances, Expense, ExpenseSplit, User};
///
/// let users = vec![
///     User::new("alice", Some("Alice".into()), "alice@example.com"),
///     User::new("bob", Some("Bob".into()), "bob@example.com"),
/// ];
/// let expenses = vec![Expense {
///     id: "e1".into(),
///     total_amount: dec!(40),
///     currency: "USD".into(),
///     paid_by: "alice".into(),
///     splits: vec![
///         ExpenseSplit { user_id: "alice".into(), amount: dec!(20) },
///         ExpenseSplit { user_id: "bob".into(), amount: dec!(20) },
///     ],
/// }];
///
/// let summary = calculate_group_balances("g1", "Trip", &expenses, &users);
/// assert_eq!(summary.user_balances[0].net_balance, dec!(20));
/// assert_eq!(summary.optimized_payments.len(), 1);
/// assert!(!summary.is_settled);
/// ```
pub fn calculate_group_balances(
    group_id: &str,
    group_name: &str,
    expenses: &[Expense],
    users: &[User],
) -> GroupBalanceSummary {
    let mut positions: HashMap<&str, Position> = users
        .iter()
        .map(|user| (user.id.as_str(), Position::default()))
        .collect();

    for expense in expenses {
        match positions.get_mut(expense.paid_by.as_str()) {
            Some(position) => position.paid += expense.total_amount,
            None => log::warn!(
                "expense {}: payer {} is not a group member, credit dropped",
                expense.id,
                expense.paid_by
            ),
        }

        for split in &expense.splits {
            match positions.get_mut(split.user_id.as_str()) {
                Some(position) => position.owed += split.amount,
                None => log::warn!(
                    "expense {}: split user {} is not a group member, share dropped",
                    expense.id,
                    split.user_id
                ),
            }
        }
    }

    let user_balances: Vec<UserBalance> = users
        .iter()
        .map(|user| {
            let position = &positions[user.id.as_str()];
            let net_balance = position.paid - position.owed;
            UserBalance {
                user_id: user.id.clone(),
                user_name: user.display_name().to_string(),
                email: user.email.clone(),
                total_owed: net_balance.max(Decimal::ZERO),
                total_owing: (-net_balance).max(Decimal::ZERO),
                net_balance,
            }
        })
        .collect();

    // Single settlement currency per computation; tagged, never converted.
    let currency = expenses
        .first()
        .map(|expense| expense.currency.as_str())
        .unwrap_or(DEFAULT_CURRENCY);

    let debt_relationships = build_debt_relationships(expenses, users, currency);
    let optimized_payments = optimize_payments(&user_balances, users, currency);

    let is_settled = user_balances
        .iter()
        .all(|balance| balance.net_balance.abs() < SETTLEMENT_TOLERANCE);

    let total_expenses: Decimal = expenses.iter().map(|expense| expense.total_amount).sum();

    GroupBalanceSummary {
        group_id: group_id.to_string(),
        group_name: group_name.to_string(),
        total_expenses,
        user_balances,
        debt_relationships,
        optimized_payments,
        is_settled,
    }
}
