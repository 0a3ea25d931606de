//! Domain models
//!
//! Input types (Expense, User) are externally owned and read-only to the
//! engine; derived types (UserBalance, GroupBalanceSummary) are immutable
//! once produced.

pub mod balance;
pub mod expense;
