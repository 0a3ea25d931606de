//! Payment simulator
//!
//! Applies one settlement payment to a previously computed summary,
//! producing a new summary without re-deriving anything from the raw
//! expenses. A settlement-layer operation: the gross debt matrix and the
//! expense total pass through untouched.

use rust_decimal::Decimal;

use crate::models::balance::{GroupBalanceSummary, OptimizedPayment, UserBalance, UserPaymentPlan};
use crate::SETTLEMENT_TOLERANCE;

/// Apply one settlement payment to a balance summary.
///
/// The payer's owing drops by the payment amount (floored at zero) and
/// their net rises by it; the payee mirrors that. The optimized payment
/// with the same two endpoints is removed — lookup is by endpoint
/// identity, not amount, since the payment is assumed to fully discharge
/// that plan entry. `is_settled` is recomputed from the updated nets.
///
/// Pure: returns a new summary, the input is not mutated.
pub fn simulate_payment(
    group_balances: &GroupBalanceSummary,
    payment: &OptimizedPayment,
) -> GroupBalanceSummary {
    let user_balances: Vec<UserBalance> = group_balances
        .user_balances
        .iter()
        .map(|balance| {
            if balance.user_id == payment.from_user_id {
                UserBalance {
                    total_owing: (balance.total_owing - payment.amount).max(Decimal::ZERO),
                    net_balance: balance.net_balance + payment.amount,
                    ..balance.clone()
                }
            } else if balance.user_id == payment.to_user_id {
                UserBalance {
                    total_owed: (balance.total_owed - payment.amount).max(Decimal::ZERO),
                    net_balance: balance.net_balance - payment.amount,
                    ..balance.clone()
                }
            } else {
                balance.clone()
            }
        })
        .collect();

    let optimized_payments: Vec<OptimizedPayment> = group_balances
        .optimized_payments
        .iter()
        .filter(|p| {
            !(p.from_user_id == payment.from_user_id && p.to_user_id == payment.to_user_id)
        })
        .cloned()
        .collect();

    let is_settled = user_balances
        .iter()
        .all(|balance| balance.net_balance.abs() < SETTLEMENT_TOLERANCE);

    GroupBalanceSummary {
        group_id: group_balances.group_id.clone(),
        group_name: group_balances.group_name.clone(),
        total_expenses: group_balances.total_expenses,
        user_balances,
        debt_relationships: group_balances.debt_relationships.clone(),
        optimized_payments,
        is_settled,
    }
}

/// One user's slice of the settlement plan.
pub fn user_payment_plan(user_id: &str, group_balances: &GroupBalanceSummary) -> UserPaymentPlan {
    let payments_to_make: Vec<OptimizedPayment> = group_balances
        .optimized_payments
        .iter()
        .filter(|payment| payment.from_user_id == user_id)
        .cloned()
        .collect();

    let payments_to_receive: Vec<OptimizedPayment> = group_balances
        .optimized_payments
        .iter()
        .filter(|payment| payment.to_user_id == user_id)
        .cloned()
        .collect();

    let total_to_make: Decimal = payments_to_make.iter().map(|p| p.amount).sum();
    let total_to_receive: Decimal = payments_to_receive.iter().map(|p| p.amount).sum();

    UserPaymentPlan {
        payments_to_make,
        payments_to_receive,
        net_amount: total_to_receive - total_to_make,
    }
}
