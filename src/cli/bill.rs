//! `bill` subcommands

use crate::{
    core::{
        bill::{self, BillFilter},
        report,
    },
    errors::{Error, Result},
    models::{Bill, BillFrequency},
};
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Add, list, change, or remove bills
#[derive(Debug, Clone, Subcommand)]
pub enum BillCommand {
    /// Add a bill
    #[command(name = "add")]
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Amount due
        #[arg(long)]
        amount: Decimal,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: NaiveDate,

        /// Last day before the bill counts as late (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        late_by: Option<NaiveDate>,

        /// The biller pulls the money automatically
        #[arg(long)]
        autopay: bool,

        /// weekly, biweekly, monthly, quarterly, annually, or once
        #[arg(long, default_value = "once")]
        frequency: String,

        /// Grouping shown in listings
        #[arg(long, default_value = "other")]
        category: String,
    },

    /// List bills
    #[command(name = "list")]
    List {
        /// Only bills in this category (`all` for every category)
        #[arg(long)]
        category: Option<String>,

        /// Only bills whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Change a bill; omitted fields keep their value
    #[command(name = "update")]
    Update {
        /// Bill id from `bill list`
        id: i64,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New amount due
        #[arg(long)]
        amount: Option<Decimal>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<NaiveDate>,

        /// New grace deadline (YYYY-MM-DD)
        #[arg(long, value_name = "DATE", conflicts_with = "clear_late_by")]
        late_by: Option<NaiveDate>,

        /// Drop the grace deadline
        #[arg(long)]
        clear_late_by: bool,

        /// Whether the biller pulls the money automatically (true or false)
        #[arg(long)]
        autopay: Option<bool>,

        /// New recurrence, or `once`
        #[arg(long)]
        frequency: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a bill
    #[command(name = "delete")]
    Delete {
        /// Bill id from `bill list`
        id: i64,
    },
}

/// Reads a bill frequency, where `once` means a one-time bill.
fn parse_frequency(value: &str) -> Result<Option<BillFrequency>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "once" | "one-time" | "onetime" | "none" => Ok(None),
        other => other.parse().map(Some),
    }
}

/// Runs a `bill` subcommand and returns what to print.
pub async fn run(command: BillCommand, db: &DatabaseConnection) -> Result<String> {
    match command {
        BillCommand::Add {
            name,
            amount,
            due,
            late_by,
            autopay,
            frequency,
            category,
        } => {
            let new_bill = Bill {
                id: 0,
                name,
                amount,
                due_date: due,
                late_by_date: late_by,
                is_autopay: autopay,
                allocated_amount: Decimal::ZERO,
                last_paid_date: None,
                last_allocated_date: None,
                frequency: parse_frequency(&frequency)?,
                category,
            };
            let stored = bill::create_bill(db, &new_bill).await?;
            Ok(format!("Added bill #{} {}.\n", stored.id, stored.name))
        }
        BillCommand::List { category, search } => {
            let bills = bill::find_bills(db, &BillFilter { category, search }).await?;
            Ok(report::format_bills(&bills))
        }
        BillCommand::Update {
            id,
            name,
            amount,
            due,
            late_by,
            clear_late_by,
            autopay,
            frequency,
            category,
        } => {
            let mut current = bill::get_bill_by_id(db, id)
                .await?
                .ok_or(Error::BillNotFound { id })?;
            if let Some(name) = name {
                current.name = name;
            }
            if let Some(amount) = amount {
                current.amount = amount;
            }
            if let Some(due) = due {
                current.due_date = due;
            }
            if clear_late_by {
                current.late_by_date = None;
            } else if late_by.is_some() {
                current.late_by_date = late_by;
            }
            if let Some(autopay) = autopay {
                current.is_autopay = autopay;
            }
            if let Some(frequency) = frequency {
                current.frequency = parse_frequency(&frequency)?;
            }
            if let Some(category) = category {
                current.category = category;
            }

            let updated = bill::update_bill(db, &current).await?;
            Ok(format!("Updated bill #{} {}.\n", updated.id, updated.name))
        }
        BillCommand::Delete { id } => {
            bill::delete_bill(db, id).await?;
            info!(id, "Bill removed from CLI");
            Ok(format!("Deleted bill #{id}.\n"))
        }
    }
}
