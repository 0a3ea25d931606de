//! Balance ledger
//!
//! Folds a snapshot of group expenses into per-user net positions and the
//! gross pairwise debt matrix.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: every split amount attributed to a member is drawn
//!    from exactly one expense total credited in full to exactly one payer,
//!    so net balances sum to zero
//! 2. **Exact arithmetic**: paid/owed accumulators are decimals end to end
//! 3. **Determinism**: output ordering follows the input user list and the
//!    sorted debt-pair keys; nothing depends on hash iteration order

pub mod balances;
pub mod debts;

// Re-export public API
pub use balances::calculate_group_balances;
pub use debts::build_debt_relationships;
