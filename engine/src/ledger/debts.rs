//! Debt matrix builder
//!
//! Derives gross pairwise debts from the expense list: for every split
//! whose user differs from the expense's payer, the split amount
//! accumulates on the (ower, payer) pair. The matrix is directional and
//! not netted; opposing A->B / B->A rows both appear, and only the
//! settlement optimizer collapses them.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::balance::DebtRelationship;
use crate::models::expense::{Expense, User};

/// Build the gross debt relationships for a set of expenses.
///
/// One row is emitted per (ower, payer) pair with a strictly positive
/// cumulative amount, display names resolved through `users`. Pairs
/// referencing an unknown user are dropped with a warning. Output order
/// is deterministic (sorted by the pair key).
pub fn build_debt_relationships(
    expenses: &[Expense],
    users: &[User],
    currency: &str,
) -> Vec<DebtRelationship> {
    let user_map: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();

    // Sparse matrix keyed (ower, payer); ordered so output is stable.
    let mut matrix: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();

    for expense in expenses {
        for split in &expense.splits {
            if split.user_id != expense.paid_by {
                *matrix
                    .entry((split.user_id.as_str(), expense.paid_by.as_str()))
                    .or_insert(Decimal::ZERO) += split.amount;
            }
        }
    }

    matrix
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .filter_map(|((from_id, to_id), amount)| {
            match (user_map.get(from_id), user_map.get(to_id)) {
                (Some(from_user), Some(to_user)) => Some(DebtRelationship {
                    from_user_id: from_id.to_string(),
                    from_user_name: from_user.display_name().to_string(),
                    to_user_id: to_id.to_string(),
                    to_user_name: to_user.display_name().to_string(),
                    amount,
                    currency: currency.to_string(),
                }),
                _ => {
                    log::warn!(
                        "debt {} -> {} references a non-member, relationship dropped",
                        from_id,
                        to_id
                    );
                    None
                }
            }
        })
        .collect()
}
