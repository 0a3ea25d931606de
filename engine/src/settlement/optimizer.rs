//! Settlement optimizer
//!
//! Greedy largest-remaining-balance matching: repeatedly pair the largest
//! outstanding creditor with the largest outstanding debtor and transfer
//! the smaller of the two remainders. Near-minimal transaction counts for
//! the group sizes this targets; a true minimum-cardinality solver is
//! NP-hard and not attempted.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::balance::{OptimizedPayment, UserBalance};
use crate::models::expense::User;
use crate::SETTLEMENT_TOLERANCE;

/// One side of the matching with its outstanding remainder
struct Party {
    user_id: String,
    user_name: String,
    remaining: Decimal,
}

/// Produce the net settlement plan for a set of user balances.
///
/// Users within the settlement tolerance of zero are treated as already
/// settled and excluded. Both sides are sorted descending by remainder;
/// the sort is stable, so equal remainders keep their input order. Each
/// emitted amount is rounded to 2 decimal places; remainders are
/// decremented by the exact amount so no value is lost across payments.
///
/// Guarantee: the emitted amounts sum to the total positive net balance.
pub fn optimize_payments(
    user_balances: &[UserBalance],
    users: &[User],
    currency: &str,
) -> Vec<OptimizedPayment> {
    let user_map: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();

    let mut creditors: Vec<Party> = user_balances
        .iter()
        .filter(|balance| balance.net_balance > SETTLEMENT_TOLERANCE)
        .map(|balance| Party {
            user_id: balance.user_id.clone(),
            user_name: balance.user_name.clone(),
            remaining: balance.net_balance,
        })
        .collect();
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut debtors: Vec<Party> = user_balances
        .iter()
        .filter(|balance| balance.net_balance < -SETTLEMENT_TOLERANCE)
        .map(|balance| Party {
            user_id: balance.user_id.clone(),
            user_name: balance.user_name.clone(),
            remaining: -balance.net_balance,
        })
        .collect();
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut payments = Vec::new();
    let mut creditor_index = 0;
    let mut debtor_index = 0;

    while creditor_index < creditors.len() && debtor_index < debtors.len() {
        let creditor = &creditors[creditor_index];
        let debtor = &debtors[debtor_index];

        let amount = creditor.remaining.min(debtor.remaining);

        if amount > SETTLEMENT_TOLERANCE {
            if user_map.contains_key(creditor.user_id.as_str())
                && user_map.contains_key(debtor.user_id.as_str())
            {
                payments.push(OptimizedPayment {
                    from_user_id: debtor.user_id.clone(),
                    from_user_name: debtor.user_name.clone(),
                    to_user_id: creditor.user_id.clone(),
                    to_user_name: creditor.user_name.clone(),
                    amount: amount.round_dp(2),
                    currency: currency.to_string(),
                    description: format!(
                        "Settlement payment from {} to {}",
                        debtor.user_name, creditor.user_name
                    ),
                });
            } else {
                log::warn!(
                    "settlement {} -> {} references a non-member, payment dropped",
                    debtor.user_id,
                    creditor.user_id
                );
            }

            creditors[creditor_index].remaining -= amount;
            debtors[debtor_index].remaining -= amount;
        }

        // A remainder at or below the tolerance counts as settled; this
        // also guarantees the loop advances when the pair's minimum is
        // too small to pay out.
        if creditors[creditor_index].remaining <= SETTLEMENT_TOLERANCE {
            creditor_index += 1;
        }
        if debtor_index < debtors.len() && debtors[debtor_index].remaining <= SETTLEMENT_TOLERANCE {
            debtor_index += 1;
        }
    }

    payments
}
