//! Derived balance models
//!
//! Everything in this module is computed fresh from an expense/user
//! snapshot on each call and never persisted inside the engine. Field
//! names serialize in camelCase to match the caller-facing JSON shape
//! (`userBalances`, `debtRelationships`, `optimizedPayments`, ...).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One user's net position in a group.
///
/// Exactly one of `total_owed` / `total_owing` is non-zero: they are
/// derived as `max(net, 0)` and `max(-net, 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub user_id: String,
    pub user_name: String,
    pub email: String,

    /// Amount this user should receive from the rest of the group
    pub total_owed: Decimal,

    /// Amount this user should pay to the rest of the group
    pub total_owing: Decimal,

    /// paid - owed; positive = creditor, negative = debtor
    pub net_balance: Decimal,
}

/// Gross cumulative debt from one user to the payer of record.
///
/// Directional and per-expense-attributed: if A owes B and B owes A, both
/// rows appear here. Only the optimizer nets opposing directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRelationship {
    pub from_user_id: String,
    pub from_user_name: String,
    pub to_user_id: String,
    pub to_user_name: String,
    pub amount: Decimal,
    pub currency: String,
}

/// One transfer in the net settlement plan.
///
/// May route money through a pair that never shared an expense; the plan
/// only guarantees that applying every payment zeroes all net balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPayment {
    pub from_user_id: String,
    pub from_user_name: String,
    pub to_user_id: String,
    pub to_user_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

/// Aggregate result of a balance computation for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalanceSummary {
    pub group_id: String,
    pub group_name: String,

    /// Sum of all expense totals (informational)
    pub total_expenses: Decimal,

    pub user_balances: Vec<UserBalance>,
    pub debt_relationships: Vec<DebtRelationship>,
    pub optimized_payments: Vec<OptimizedPayment>,

    /// True iff every net balance is within the settlement tolerance
    pub is_settled: bool,
}

/// A single user's view of the settlement plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPaymentPlan {
    pub payments_to_make: Vec<OptimizedPayment>,
    pub payments_to_receive: Vec<OptimizedPayment>,

    /// to-receive minus to-make
    pub net_amount: Decimal,
}
