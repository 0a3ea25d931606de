//! Settlement module
//!
//! Turns per-user net positions into a settlement plan and lets callers
//! replay settlement payments against a computed summary:
//! - Greedy largest-remaining matching of creditors and debtors
//! - Pure payment simulation (new summary, input untouched)
//! - Per-user view of the plan
//!
//! # Critical Invariants
//!
//! 1. **Completeness**: applying every optimized payment brings all net
//!    balances within the settlement tolerance
//! 2. **Value conservation**: emitted payment amounts sum to the total
//!    positive net balance (equivalently, the total negative one)
//! 3. **Purity**: simulation never mutates its input snapshot

pub mod optimizer;
pub mod simulator;

// Re-export public API
pub use optimizer::optimize_payments;
pub use simulator::{simulate_payment, user_payment_plan};
