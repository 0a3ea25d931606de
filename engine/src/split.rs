//! Split calculator
//!
//! Derives per-member splits from an expense total and a split policy.
//!
//! # Rounding policy
//!
//! Every raw split is rounded to 2 decimal places, then the entire
//! residual against the (2 dp) total is added to the **first**
//! participant's split. The adjustment is deterministic and stable, and
//! the returned splits always sum exactly to the rounded total:
//!
//! ```
//! use rust_decimal_macros::dec;
//! use splitledger_core::{calculate_split_amounts, SplitParticipant, SplitType};
//!
//! let participants = vec![
//!     SplitParticipant::new("a"),
//!     SplitParticipant::new("b"),
//!     SplitParticipant::new("c"),
//! ];
//! let splits = calculate_split_amounts(dec!(100), SplitType::Equal, &participants).unwrap();
//!
//! assert_eq!(splits[0].amount, dec!(33.34)); // absorbs the cent
//! assert_eq!(splits[1].amount, dec!(33.33));
//! let total: rust_decimal::Decimal = splits.iter().map(|s| s.amount).sum();
//! assert_eq!(total, dec!(100));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::expense::{ExpenseSplit, SplitParticipant, SplitType};

/// Errors raised by the split calculator
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("cannot split an expense across zero participants")]
    NoParticipants,
}

/// Derive per-participant split amounts for one expense.
///
/// - [`SplitType::Equal`]: exact-decimal n-way division.
/// - [`SplitType::Percentage`]: amount = total x percentage / 100.
///   Participants without a percentage are skipped; the caller is
///   responsible for percentages summing to 100.
/// - [`SplitType::Custom`]: explicit per-participant amounts; participants
///   without one are skipped.
///
/// Returns [`SplitError::NoParticipants`] for an empty participant list.
pub fn calculate_split_amounts(
    total_amount: Decimal,
    split_type: SplitType,
    participants: &[SplitParticipant],
) -> Result<Vec<ExpenseSplit>, SplitError> {
    if participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let mut splits: Vec<ExpenseSplit> = match split_type {
        SplitType::Equal => {
            let share = total_amount / Decimal::from(participants.len());
            participants
                .iter()
                .map(|p| ExpenseSplit {
                    user_id: p.user_id.clone(),
                    amount: share,
                })
                .collect()
        }
        SplitType::Percentage => participants
            .iter()
            .filter_map(|p| {
                p.percentage.map(|pct| ExpenseSplit {
                    user_id: p.user_id.clone(),
                    amount: total_amount * pct / dec!(100),
                })
            })
            .collect(),
        SplitType::Custom => participants
            .iter()
            .filter_map(|p| {
                p.custom_amount.map(|amount| ExpenseSplit {
                    user_id: p.user_id.clone(),
                    amount,
                })
            })
            .collect(),
    };

    for split in &mut splits {
        split.amount = split.amount.round_dp(2);
    }

    // Push the whole residual onto the first split so the output sums
    // exactly to the total. Also covers custom/percentage inputs that
    // fall short of the total: the first participant absorbs the gap.
    let rounded_sum: Decimal = splits.iter().map(|s| s.amount).sum();
    let residual = total_amount.round_dp(2) - rounded_sum;
    if !residual.is_zero() {
        if let Some(first) = splits.first_mut() {
            first.amount += residual;
        }
    }

    Ok(splits)
}
