//! Splitledger Core - Balance & Settlement Engine
//!
//! Deterministic, stateless computation over a snapshot of group expenses:
//! per-user net positions, the gross pairwise debt matrix, a greedy
//! minimal-transfer settlement plan, and settlement-payment simulation.
//!
//! # Architecture
//!
//! - **models**: Domain types (Expense, User, UserBalance, GroupBalanceSummary)
//! - **split**: Per-member split derivation (equal / percentage / custom)
//! - **ledger**: Balance aggregation and the gross debt matrix
//! - **settlement**: Settlement optimizer and payment simulator
//!
//! # Critical Invariants
//!
//! 1. All money values are exact decimals; binary floats appear only in
//!    serialized JSON output
//! 2. Every entry point is a pure function of its explicit inputs
//! 3. Money is conserved: net balances across a group always sum to zero

// Module declarations
pub mod ledger;
pub mod models;
pub mod settlement;
pub mod split;

// Re-exports for convenience
pub use ledger::{build_debt_relationships, calculate_group_balances};
pub use models::{
    balance::{
        DebtRelationship, GroupBalanceSummary, OptimizedPayment, UserBalance, UserPaymentPlan,
    },
    expense::{Expense, ExpenseError, ExpenseSplit, SplitParticipant, SplitType, User},
};
pub use settlement::{optimize_payments, simulate_payment, user_payment_plan};
pub use split::{calculate_split_amounts, SplitError};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Net balances within this tolerance of zero are treated as settled.
pub const SETTLEMENT_TOLERANCE: Decimal = dec!(0.01);

/// Fallback currency tag for a group with no expenses.
pub const DEFAULT_CURRENCY: &str = "USD";
