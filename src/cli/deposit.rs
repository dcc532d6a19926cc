//! `deposit` subcommands

use crate::{
    core::{deposit, report},
    errors::Result,
    models::OneTimeDeposit,
};
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Track money expected once, outside the pay schedule
#[derive(Debug, Clone, Subcommand)]
pub enum DepositCommand {
    /// Record an expected deposit
    #[command(name = "add")]
    Add {
        /// What the money is (e.g. tax refund)
        #[arg(long)]
        name: String,

        /// Expected amount
        #[arg(long)]
        amount: Decimal,

        /// When it should arrive (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        expected: NaiveDate,
    },

    /// List deposits not yet received
    #[command(name = "list")]
    List,

    /// Mark a deposit as received
    #[command(name = "receive")]
    Receive {
        /// Deposit id from `deposit list`
        id: i64,
    },

    /// Remove a deposit
    #[command(name = "delete")]
    Delete {
        /// Deposit id from `deposit list`
        id: i64,
    },
}

/// Runs a `deposit` subcommand and returns what to print.
pub async fn run(command: DepositCommand, db: &DatabaseConnection) -> Result<String> {
    match command {
        DepositCommand::Add {
            name,
            amount,
            expected,
        } => {
            let new_deposit = OneTimeDeposit {
                id: 0,
                name,
                amount,
                expected_date: expected,
                received: false,
            };
            let stored = deposit::create_deposit(db, &new_deposit).await?;
            Ok(format!("Added deposit #{} {}.\n", stored.id, stored.name))
        }
        DepositCommand::List => {
            let pending = deposit::get_pending_deposits(db).await?;
            if pending.is_empty() {
                return Ok("No deposits expected.\n".to_string());
            }
            Ok(report::format_deposits(&pending))
        }
        DepositCommand::Receive { id } => {
            if deposit::mark_received(db, id).await? {
                Ok(format!("Deposit #{id} received.\n"))
            } else {
                Ok(format!("Deposit #{id} was already received.\n"))
            }
        }
        DepositCommand::Delete { id } => {
            deposit::delete_deposit(db, id).await?;
            Ok(format!("Deleted deposit #{id}.\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_deposit_add_receive() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(run(DepositCommand::List, &db).await?, "No deposits expected.\n");

        let added = run(
            DepositCommand::Add {
                name: "Tax refund".to_string(),
                amount: Decimal::from(1200),
                expected: date(2024, 4, 15),
            },
            &db,
        )
        .await?;
        assert_eq!(added, "Added deposit #1 Tax refund.\n");
        assert!(run(DepositCommand::List, &db).await?.contains("Tax refund - $1,200.00"));

        assert_eq!(
            run(DepositCommand::Receive { id: 1 }, &db).await?,
            "Deposit #1 received.\n"
        );
        assert!(
            run(DepositCommand::Receive { id: 1 }, &db)
                .await?
                .contains("already received")
        );
        assert_eq!(run(DepositCommand::List, &db).await?, "No deposits expected.\n");
        Ok(())
    }
}
