//! `income` subcommands

use crate::{
    core::{income, report},
    errors::{Error, Result},
    models::{Income, PayFrequency},
};
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Add, list, change, or remove incomes
#[derive(Debug, Clone, Subcommand)]
pub enum IncomeCommand {
    /// Add an income stream
    #[command(name = "add")]
    Add {
        /// Display name (e.g. employer)
        #[arg(long)]
        name: String,

        /// Amount of each paycheck
        #[arg(long)]
        amount: Decimal,

        /// weekly, biweekly, semimonthly, monthly, or irregular
        #[arg(long, default_value = "biweekly")]
        frequency: String,

        /// Date of the next paycheck (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        next_payday: Option<NaiveDate>,

        /// Make this the income that drives the payday cycle
        #[arg(long)]
        primary: bool,
    },

    /// List incomes
    #[command(name = "list")]
    List,

    /// Change an income; omitted fields keep their value
    #[command(name = "update")]
    Update {
        /// Income id from `income list`
        id: i64,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New paycheck amount
        #[arg(long)]
        amount: Option<Decimal>,

        /// New pay schedule
        #[arg(long)]
        frequency: Option<String>,

        /// New next payday (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        next_payday: Option<NaiveDate>,

        /// Whether this income drives the payday cycle (true or false)
        #[arg(long)]
        primary: Option<bool>,
    },

    /// Remove an income
    #[command(name = "delete")]
    Delete {
        /// Income id from `income list`
        id: i64,
    },
}

/// Runs an `income` subcommand and returns what to print.
pub async fn run(command: IncomeCommand, db: &DatabaseConnection) -> Result<String> {
    match command {
        IncomeCommand::Add {
            name,
            amount,
            frequency,
            next_payday,
            primary,
        } => {
            let new_income = Income {
                id: 0,
                name,
                paycheck_amount: amount,
                pay_frequency: frequency.parse()?,
                next_payday,
                is_primary: primary,
            };
            let stored = income::create_income(db, &new_income).await?;
            Ok(format!("Added income #{} {}.\n", stored.id, stored.name))
        }
        IncomeCommand::List => {
            let incomes = income::get_all_incomes(db).await?;
            Ok(report::format_incomes(&incomes))
        }
        IncomeCommand::Update {
            id,
            name,
            amount,
            frequency,
            next_payday,
            primary,
        } => {
            let mut current = income::get_income_by_id(db, id)
                .await?
                .ok_or(Error::IncomeNotFound { id })?;
            if let Some(name) = name {
                current.name = name;
            }
            if let Some(amount) = amount {
                current.paycheck_amount = amount;
            }
            if let Some(frequency) = frequency {
                current.pay_frequency = frequency.parse::<PayFrequency>()?;
            }
            if next_payday.is_some() {
                current.next_payday = next_payday;
            }
            if let Some(primary) = primary {
                current.is_primary = primary;
            }

            let updated = income::update_income(db, &current).await?;
            Ok(format!("Updated income #{} {}.\n", updated.id, updated.name))
        }
        IncomeCommand::Delete { id } => {
            income::delete_income(db, id).await?;
            info!(id, "Income removed from CLI");
            Ok(format!("Deleted income #{id}.\n"))
        }
    }
}
