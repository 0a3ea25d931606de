use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use splitledger_core::{
    calculate_group_balances, calculate_split_amounts, simulate_payment, Expense,
    GroupBalanceSummary, OptimizedPayment, SplitParticipant, SplitType, User,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "splitledger")]
#[command(about = "Splitledger CLI - group balances and settlement plans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long, default_value = "human")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the full balance summary for a group snapshot
    Balances {
        /// Snapshot file (JSON: groupId, groupName, expenses, users)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print only the optimized settlement plan
    Optimize {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Apply one settlement payment to the computed summary
    Simulate {
        #[arg(short, long)]
        file: PathBuf,

        /// Paying user id
        #[arg(long)]
        from: String,

        /// Receiving user id
        #[arg(long)]
        to: String,

        /// Payment amount
        #[arg(long)]
        amount: Decimal,
    },

    /// Derive split amounts for a single expense
    Split {
        #[arg(long)]
        total: Decimal,

        /// EQUAL, PERCENTAGE or CUSTOM
        #[arg(long, default_value = "EQUAL")]
        split_type: String,

        /// Participant as "id" (equal) or "id:value" (percentage/custom)
        #[arg(long = "participant")]
        participants: Vec<String>,
    },

    /// Write a sample group snapshot to stdout
    Sample,
}

/// On-disk shape consumed by the CLI: group header plus the raw
/// expense/user records the engine computes from.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub group_id: String,
    pub group_name: String,
    pub expenses: Vec<Expense>,
    pub users: Vec<User>,
}

pub fn run(cli: Cli) -> Result<()> {
    let as_json = match cli.format.as_str() {
        "json" => true,
        "human" => false,
        other => bail!("unknown format {other:?}, expected \"human\" or \"json\""),
    };

    match cli.command {
        Commands::Balances { file } => {
            let snapshot = load_snapshot(&file)?;
            let summary = summarize(&snapshot);
            if as_json {
                print_json(&summary)?;
            } else {
                print_summary(&summary);
            }
        }

        Commands::Optimize { file } => {
            let snapshot = load_snapshot(&file)?;
            let summary = summarize(&snapshot);
            if as_json {
                print_json(&summary.optimized_payments)?;
            } else {
                print_payments(&summary.optimized_payments);
            }
        }

        Commands::Simulate {
            file,
            from,
            to,
            amount,
        } => {
            let snapshot = load_snapshot(&file)?;
            let summary = summarize(&snapshot);
            let payment = OptimizedPayment {
                from_user_id: from.clone(),
                from_user_name: display_name(&snapshot.users, &from)?.to_string(),
                to_user_id: to.clone(),
                to_user_name: display_name(&snapshot.users, &to)?.to_string(),
                amount,
                currency: snapshot
                    .expenses
                    .first()
                    .map(|e| e.currency.clone())
                    .unwrap_or_else(|| "USD".to_string()),
                description: format!("Manual settlement of {amount} from {from} to {to}"),
            };

            let updated = simulate_payment(&summary, &payment);
            if as_json {
                print_json(&updated)?;
            } else {
                print_summary(&updated);
            }
        }

        Commands::Split {
            total,
            split_type,
            participants,
        } => {
            let split_type = parse_split_type(&split_type)?;
            let participants = participants
                .iter()
                .map(|spec| parse_participant(spec, split_type))
                .collect::<Result<Vec<_>>>()?;

            let splits = calculate_split_amounts(total, split_type, &participants)?;
            if as_json {
                print_json(&splits)?;
            } else {
                for split in &splits {
                    println!("{:<20} {:>10}", split.user_id, split.amount);
                }
            }
        }

        Commands::Sample => print_json(&sample_snapshot())?,
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<GroupSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: GroupSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    // Boundary validation; the engine itself propagates whatever numbers
    // it is given.
    for expense in &snapshot.expenses {
        expense
            .validate()
            .with_context(|| format!("invalid expense {}", expense.id))?;
    }

    Ok(snapshot)
}

fn summarize(snapshot: &GroupSnapshot) -> GroupBalanceSummary {
    calculate_group_balances(
        &snapshot.group_id,
        &snapshot.group_name,
        &snapshot.expenses,
        &snapshot.users,
    )
}

fn display_name<'a>(users: &'a [User], id: &str) -> Result<&'a str> {
    users
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.display_name())
        .with_context(|| format!("user {id} is not a member of this group"))
}

fn parse_split_type(s: &str) -> Result<SplitType> {
    match s {
        "EQUAL" => Ok(SplitType::Equal),
        "PERCENTAGE" => Ok(SplitType::Percentage),
        "CUSTOM" => Ok(SplitType::Custom),
        other => bail!("unknown split type {other:?}, expected EQUAL, PERCENTAGE or CUSTOM"),
    }
}

fn parse_participant(spec: &str, split_type: SplitType) -> Result<SplitParticipant> {
    match spec.split_once(':') {
        None => Ok(SplitParticipant::new(spec)),
        Some((id, value)) => {
            let value: Decimal = value
                .parse()
                .with_context(|| format!("participant {id}: bad value {value:?}"))?;
            Ok(match split_type {
                SplitType::Percentage => SplitParticipant::new(id).with_percentage(value),
                SplitType::Custom => SplitParticipant::new(id).with_custom_amount(value),
                SplitType::Equal => SplitParticipant::new(id),
            })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(summary: &GroupBalanceSummary) {
    println!("Group: {} ({})", summary.group_name, summary.group_id);
    println!("Total spent: {}", summary.total_expenses);
    println!();

    println!("Balances:");
    for balance in &summary.user_balances {
        println!(
            "  {:<24} net {:>10}   (owed {}, owing {})",
            balance.user_name, balance.net_balance, balance.total_owed, balance.total_owing
        );
    }

    if !summary.debt_relationships.is_empty() {
        println!();
        println!("Debts (gross):");
        for debt in &summary.debt_relationships {
            println!(
                "  {} -> {}  {} {}",
                debt.from_user_name, debt.to_user_name, debt.amount, debt.currency
            );
        }
    }

    println!();
    print_payments(&summary.optimized_payments);
    println!();
    println!("Settled: {}", if summary.is_settled { "yes" } else { "no" });
}

fn print_payments(payments: &[OptimizedPayment]) {
    if payments.is_empty() {
        println!("Settlement plan: nothing to settle");
        return;
    }
    println!("Settlement plan:");
    for payment in payments {
        println!(
            "  {} -> {}  {} {}",
            payment.from_user_name, payment.to_user_name, payment.amount, payment.currency
        );
    }
}

fn sample_snapshot() -> GroupSnapshot {
    let users = vec![
        User::new("alice", Some("Alice".into()), "alice@example.com"),
        User::new("bob", Some("Bob".into()), "bob@example.com"),
        User::new("charlie", Some("Charlie".into()), "charlie@example.com"),
    ];

    let participants: Vec<SplitParticipant> = users
        .iter()
        .map(|u| SplitParticipant::new(u.id.clone()))
        .collect();

    let expense = |total: Decimal, paid_by: &str| Expense {
        id: Uuid::new_v4().to_string(),
        total_amount: total,
        currency: "USD".to_string(),
        paid_by: paid_by.to_string(),
        splits: calculate_split_amounts(total, SplitType::Equal, &participants)
            .expect("participants is non-empty"),
    };

    GroupSnapshot {
        group_id: Uuid::new_v4().to_string(),
        group_name: "Weekend Trip".to_string(),
        expenses: vec![
            expense(dec!(300), "alice"),
            expense(dec!(150), "bob"),
            expense(dec!(90), "charlie"),
        ],
        users,
    }
}
