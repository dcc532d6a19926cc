//! `budget` subcommands

use crate::{
    core::{budget, report},
    errors::Result,
};
use clap::Subcommand;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Show or change the bucket split
#[derive(Debug, Clone, Subcommand)]
pub enum BudgetCommand {
    /// Show bucket percentages and the bills carry-forward
    #[command(name = "show")]
    Show,

    /// Change bucket percentages or the carry-forward; omitted fields keep their value
    #[command(name = "set")]
    Set {
        /// Percent of each paycheck for bills
        #[arg(long)]
        bills: Option<Decimal>,

        /// Percent of each paycheck for spending
        #[arg(long)]
        spending: Option<Decimal>,

        /// Percent of each paycheck for savings
        #[arg(long)]
        savings: Option<Decimal>,

        /// Bills bucket balance carried into the next payday
        #[arg(long)]
        balance: Option<Decimal>,
    },
}

/// Runs a `budget` subcommand and returns what to print.
pub async fn run(command: BudgetCommand, db: &DatabaseConnection) -> Result<String> {
    match command {
        BudgetCommand::Show => Ok(report::format_buckets(&budget::get_buckets(db).await?)),
        BudgetCommand::Set {
            bills,
            spending,
            savings,
            balance,
        } => {
            let mut buckets = budget::get_buckets(db).await?;
            if let Some(bills) = bills {
                buckets.bills_percentage = bills;
            }
            if let Some(spending) = spending {
                buckets.spending_percentage = spending;
            }
            if let Some(savings) = savings {
                buckets.savings_percentage = savings;
            }
            if let Some(balance) = balance {
                buckets.bills_bucket_balance = balance;
            }

            let saved = budget::save_buckets(db, &buckets).await?;
            Ok(format!("Budget saved.\n{}", report::format_buckets(&saved)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, test_utils::*};

    #[tokio::test]
    async fn test_budget_set_keeps_unset_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let text = run(
            BudgetCommand::Set {
                bills: Some(Decimal::from(60)),
                spending: Some(Decimal::from(25)),
                savings: Some(Decimal::from(15)),
                balance: None,
            },
            &db,
        )
        .await?;
        assert!(text.starts_with("Budget saved."));
        assert!(!text.contains("Warning"));

        let saved = budget::get_buckets(&db).await?;
        assert_eq!(saved.bills_percentage, Decimal::from(60));
        assert_eq!(saved.savings_percentage, Decimal::from(15));
        assert_eq!(saved.bills_bucket_balance, Decimal::ZERO);

        let shown = run(
            BudgetCommand::Set {
                bills: Some(Decimal::from(70)),
                spending: None,
                savings: None,
                balance: Some(Decimal::from(125)),
            },
            &db,
        )
        .await?;
        assert!(shown.contains("Carry forward: $125.00"));
        assert!(shown.contains("Warning"));
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_set_rejects_out_of_range() -> Result<()> {
        let db = setup_test_db().await?;
        let result = run(
            BudgetCommand::Set {
                bills: Some(Decimal::from(150)),
                spending: None,
                savings: None,
                balance: None,
            },
            &db,
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidBudgetConfiguration { .. })));
        assert_eq!(budget::get_buckets(&db).await?, buckets(50, 30, 20, 0));
        Ok(())
    }
}
