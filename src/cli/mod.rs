//! CLI argument structures and command dispatch
//!
//! Every command returns the text to print so the dispatch can be tested
//! without capturing stdout. Record management lives in one submodule per
//! record type.

pub mod bill;
pub mod budget;
pub mod deposit;
pub mod income;

use crate::{
    config::settings::{self, Config},
    core::{
        allocator::PaydayCycle, bill as bill_store, completion, deposit as deposit_store, history,
        planner, report,
    },
    errors::Result,
};
use bill::BillCommand;
use budget::BudgetCommand;
use deposit::DepositCommand;
use income::IncomeCommand;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use tracing::{debug, info};

/// Plan each paycheck across bills, spending, and savings
#[derive(Debug, Parser)]
#[command(name = "payday-planner")]
#[command(about = "payday-planner - Split each paycheck and decide which bills to pay now", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the budget configuration file
    #[arg(short, long, default_value = settings::DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands; `plan` runs when none is given
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the plan for the upcoming payday without changing anything
    #[command(name = "plan")]
    Plan {
        /// Plan as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,
    },

    /// Record the upcoming payday and advance to the next one
    #[command(name = "complete")]
    Complete {
        /// Plan as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,

        /// Confirm the writes; without it the plan is only shown
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List recently completed paydays
    #[command(name = "history")]
    History {
        /// Number of paydays to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: u64,
    },

    /// Load the budget, incomes, and bills from the config file into an empty store
    #[command(name = "seed")]
    Seed,

    /// Manage incomes
    #[command(subcommand, name = "income")]
    Income(IncomeCommand),

    /// Manage bills
    #[command(subcommand, name = "bill")]
    Bill(BillCommand),

    /// Show or change the bucket split
    #[command(subcommand, name = "budget")]
    Budget(BudgetCommand),

    /// Track one-time deposits
    #[command(subcommand, name = "deposit")]
    Deposit(DepositCommand),
}

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

async fn plan_text(db: &DatabaseConnection, today: NaiveDate) -> Result<(PaydayCycle, String)> {
    let cycle = planner::plan_payday(db, today).await?;
    let bills = bill_store::get_all_bills(db).await?;
    let mut text = report::format_plan_summary(&cycle, bill_store::total_unallocated(&bills)?);
    if cycle.is_planned() {
        // Deposits are listed for information only; the split uses the paycheck alone
        text.push_str(&report::format_deposits(
            &deposit_store::get_pending_deposits(db).await?,
        ));
    }
    Ok((cycle, text))
}

/// Runs one command against the store and returns what to print.
pub async fn run_command(
    command: Commands,
    db: &DatabaseConnection,
    config: &Config,
) -> Result<String> {
    debug!(?command, "Running command");
    match command {
        Commands::Plan { today } => {
            let (_, text) = plan_text(db, resolve_today(today)).await?;
            Ok(text)
        }
        Commands::Complete { today, yes } => {
            let (cycle, mut text) = plan_text(db, resolve_today(today)).await?;
            if !cycle.is_planned() {
                return Ok(text);
            }
            if !yes {
                text.push_str("\nNothing recorded. Run again with --yes to complete this payday.\n");
                return Ok(text);
            }

            let outcome = completion::complete_payday(db, &cycle).await?;
            text.push('\n');
            text.push_str(&report::format_completion(&outcome));
            text.push('\n');
            Ok(text)
        }
        Commands::History { limit } => {
            let records = history::get_recent_history(db, limit).await?;
            Ok(report::format_history(&records))
        }
        Commands::Seed => {
            let seeded = settings::seed_store(db, config).await?;
            info!(incomes = seeded.incomes, bills = seeded.bills, "Seed finished");
            if seeded.skipped {
                return Ok("Store already has incomes or bills; nothing seeded.\n".to_string());
            }
            Ok(format!(
                "Budget saved. Added {} incomes and {} bills.\n",
                seeded.incomes, seeded.bills
            ))
        }
        Commands::Income(command) => income::run(command, db).await,
        Commands::Bill(command) => bill::run(command, db).await,
        Commands::Budget(command) => budget::run(command, db).await,
        Commands::Deposit(command) => deposit::run(command, db).await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::income as income_store, test_utils::*};
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_complete_args() {
        let cli = Cli::try_parse_from([
            "payday-planner",
            "-vv",
            "complete",
            "--today",
            "2024-02-20",
            "--yes",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        let Some(Commands::Complete { today, yes }) = cli.command else {
            unreachable!("parsed a different subcommand");
        };
        assert_eq!(today, Some(date(2024, 2, 20)));
        assert!(yes);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Cli::try_parse_from(["payday-planner", "plan", "--today", "02/20/2024"]).is_err());
    }

    #[test]
    fn test_parse_history_default_limit() {
        let cli = Cli::try_parse_from(["payday-planner", "history"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::History { limit: 10 })));
    }

    #[test]
    fn test_parse_record_subcommands() {
        let cli = Cli::try_parse_from([
            "payday-planner",
            "bill",
            "list",
            "--category",
            "utilities",
            "--search",
            "power",
        ])
        .unwrap();
        let Some(Commands::Bill(BillCommand::List { category, search })) = cli.command else {
            unreachable!("parsed a different subcommand");
        };
        assert_eq!(category.as_deref(), Some("utilities"));
        assert_eq!(search.as_deref(), Some("power"));

        let cli = Cli::try_parse_from([
            "payday-planner",
            "income",
            "update",
            "3",
            "--amount",
            "2100.50",
            "--primary",
            "false",
        ])
        .unwrap();
        let Some(Commands::Income(IncomeCommand::Update {
            id,
            amount,
            primary,
            ..
        })) = cli.command
        else {
            unreachable!("parsed a different subcommand");
        };
        assert_eq!(id, 3);
        assert_eq!(amount, Some(Decimal::new(210_050, 2)));
        assert_eq!(primary, Some(false));

        let cli =
            Cli::try_parse_from(["payday-planner", "budget", "set", "--bills", "55"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Budget(BudgetCommand::Set { bills: Some(b), spending: None, .. }))
                if b == Decimal::from(55)
        ));

        assert!(Cli::try_parse_from(["payday-planner", "bill", "delete"]).is_err());
        assert!(
            Cli::try_parse_from([
                "payday-planner",
                "bill",
                "update",
                "1",
                "--late-by",
                "2024-03-10",
                "--clear-late-by",
            ])
            .is_err()
        );
    }

    #[tokio::test]
    async fn test_plan_lists_pending_deposits() -> Result<()> {
        let (db, _) = setup_march_store().await?;
        let config = Config::default();
        run_command(
            Commands::Deposit(DepositCommand::Add {
                name: "Tax refund".to_string(),
                amount: Decimal::from(1200),
                expected: date(2024, 3, 20),
            }),
            &db,
            &config,
        )
        .await?;

        let today = Some(date(2024, 2, 20));
        let plan = run_command(Commands::Plan { today }, &db, &config).await?;
        assert!(plan.contains("One-time deposits expected:"));
        assert!(plan.contains("Tax refund - $1,200.00 expected Mar 20, 2024"));
        // The deposit is not part of the split
        assert!(plan.contains("Paycheck $2,000.00"));

        run_command(Commands::Deposit(DepositCommand::Receive { id: 1 }), &db, &config).await?;
        let plan = run_command(Commands::Plan { today }, &db, &config).await?;
        assert!(!plan.contains("Tax refund"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bill_changes_show_up_in_plan() -> Result<()> {
        let (db, stored) = setup_march_store().await?;
        let config = Config::default();
        let rent_id = stored[1].id;

        run_command(
            Commands::Bill(BillCommand::Delete { id: rent_id }),
            &db,
            &config,
        )
        .await?;
        let plan = run_command(
            Commands::Plan {
                today: Some(date(2024, 2, 20)),
            },
            &db,
            &config,
        )
        .await?;
        assert!(!plan.contains("Rent"));
        assert!(plan.contains("Power"));
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_without_yes_changes_nothing() -> Result<()> {
        let (db, _) = setup_march_store().await?;
        let command = Commands::Complete {
            today: Some(date(2024, 2, 20)),
            yes: false,
        };

        let text = run_command(command, &db, &Config::default()).await?;
        assert!(text.contains("Run again with --yes"));

        let primary = income_store::get_primary_income(&db).await?.unwrap();
        assert_eq!(primary.next_payday, Some(date(2024, 3, 1)));
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_then_history() -> Result<()> {
        let (db, _) = setup_march_store().await?;
        let command = Commands::Complete {
            today: Some(date(2024, 2, 20)),
            yes: true,
        };

        let text = run_command(command.clone(), &db, &Config::default()).await?;
        assert!(text.contains("Pay these bills now:"));
        assert!(text.contains("2024-03-01 complete"));

        // The schedule moved on, so the same command plans the following payday
        let again = run_command(command, &db, &Config::default()).await?;
        assert!(again.contains("2024-03-15 complete"));

        let history = run_command(Commands::History { limit: 5 }, &db, &Config::default()).await?;
        assert!(history.starts_with("2024-03-15"));
        assert!(history.contains("2024-03-01"));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_then_plan() -> Result<()> {
        let db = setup_test_db().await?;
        let config = settings::parse_config(
            r#"
            [[incomes]]
            name = "Day job"
            paycheck_amount = 1000
            pay_frequency = "weekly"
            next_payday = "2024-03-01"
            is_primary = true

            [[bills]]
            name = "Phone"
            amount = 80
            due_date = "2024-02-28"
            "#,
        )?;

        let text = run_command(Commands::Seed, &db, &config).await?;
        assert_eq!(text, "Budget saved. Added 1 incomes and 1 bills.\n");
        let again = run_command(Commands::Seed, &db, &config).await?;
        assert!(again.contains("nothing seeded"));

        let plan = run_command(
            Commands::Plan {
                today: Some(date(2024, 2, 26)),
            },
            &db,
            &config,
        )
        .await?;
        assert!(plan.contains("Phone - $80.00 due Feb 28"));
        assert!(plan.contains("Carry forward: $420.00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_plan_without_income() -> Result<()> {
        let db = setup_test_db().await?;
        let text = run_command(
            Commands::Complete {
                today: Some(date(2024, 2, 20)),
                yes: true,
            },
            &db,
            &Config::default(),
        )
        .await?;
        assert!(text.starts_with("No payday set"));
        Ok(())
    }
}
