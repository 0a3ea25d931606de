//! Expense and user input models
//!
//! These records are owned by the caller (fetched from whatever store the
//! surrounding application uses); the engine only reads them. All amounts
//! are exact decimals.
//!
//! CRITICAL: money is never accumulated in binary floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SETTLEMENT_TOLERANCE;

/// How an expense total is divided across participants.
///
/// Closed set: an unrecognized wire value fails at deserialization instead
/// of silently producing no splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    /// Divide the total evenly across all participants
    Equal,

    /// Each participant supplies a percentage of the total (0-100)
    Percentage,

    /// Each participant supplies an explicit amount
    Custom,
}

/// One participant handed to the split calculator.
///
/// `percentage` is read for [`SplitType::Percentage`], `custom_amount` for
/// [`SplitType::Custom`]; a participant missing the relevant field produces
/// no split row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitParticipant {
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<Decimal>,
}

impl SplitParticipant {
    /// Participant with no per-user share data (equal splits).
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            percentage: None,
            custom_amount: None,
        }
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_custom_amount(mut self, amount: Decimal) -> Self {
        self.custom_amount = Some(amount);
        self
    }
}

/// The portion of an expense's total attributed to one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSplit {
    pub user_id: String,
    pub amount: Decimal,
}

/// Errors raised by boundary validation of an expense record.
#[derive(Debug, Error, PartialEq)]
pub enum ExpenseError {
    #[error("expense {id}: amount {amount} must be non-negative")]
    NegativeAmount { id: String, amount: Decimal },

    #[error("expense {id}: splits total {split_total} does not match expense total {total}")]
    SplitMismatch {
        id: String,
        split_total: Decimal,
        total: Decimal,
    },
}

/// A group expense as recorded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque identifier, assigned by the caller's store
    pub id: String,

    /// Total amount fronted by the payer
    pub total_amount: Decimal,

    /// 3-letter currency code. The engine never converts between
    /// currencies; it only tags derived output with this code.
    pub currency: String,

    /// User who fronted the money
    pub paid_by: String,

    /// Per-participant shares; expected to sum to `total_amount`
    pub splits: Vec<ExpenseSplit>,
}

impl Expense {
    /// Boundary check for expense records before they enter a store.
    ///
    /// The computation paths never call this: an inconsistent expense is
    /// the caller's precondition violation and the engine propagates the
    /// numbers it was given. Validate at the expense-creation boundary.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.total_amount < Decimal::ZERO {
            return Err(ExpenseError::NegativeAmount {
                id: self.id.clone(),
                amount: self.total_amount,
            });
        }
        for split in &self.splits {
            if split.amount < Decimal::ZERO {
                return Err(ExpenseError::NegativeAmount {
                    id: self.id.clone(),
                    amount: split.amount,
                });
            }
        }

        let split_total: Decimal = self.splits.iter().map(|s| s.amount).sum();
        if (split_total - self.total_amount).abs() > SETTLEMENT_TOLERANCE {
            return Err(ExpenseError::SplitMismatch {
                id: self.id.clone(),
                split_total,
                total: self.total_amount,
            });
        }
        Ok(())
    }
}

/// A group member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Display name; `None` falls back to the email address
    pub full_name: Option<String>,

    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, full_name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name,
            email: email.into(),
        }
    }

    /// Name shown in derived output: full name, or email when unset.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}
