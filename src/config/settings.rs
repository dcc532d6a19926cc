//! Budget configuration loading from config.toml
//!
//! The config file holds the bucket percentages and, optionally, incomes and
//! bills used to seed an empty store on first run. Dates are written as
//! quoted `YYYY-MM-DD` strings.

use crate::{
    core::{bill as bill_store, budget as budget_store, income as income_store},
    entities::{Bill as BillEntity, Income as IncomeEntity},
    errors::{Error, Result},
    models::{Bill, BillFrequency, BudgetBuckets, Income, PayFrequency},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Bucket percentages and starting carry-forward
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Incomes to seed
    #[serde(default)]
    pub incomes: Vec<IncomeConfig>,
    /// Bills to seed
    #[serde(default)]
    pub bills: Vec<BillConfig>,
}

/// The `[budget]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Share of each paycheck for bills
    pub bills_percentage: Decimal,
    /// Share of each paycheck for spending
    pub spending_percentage: Decimal,
    /// Share of each paycheck for savings
    pub savings_percentage: Decimal,
    /// Starting bills carry-forward
    pub bills_bucket_balance: Decimal,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        let defaults = BudgetBuckets::default();
        Self {
            bills_percentage: defaults.bills_percentage,
            spending_percentage: defaults.spending_percentage,
            savings_percentage: defaults.savings_percentage,
            bills_bucket_balance: defaults.bills_bucket_balance,
        }
    }
}

impl From<&BudgetConfig> for BudgetBuckets {
    fn from(config: &BudgetConfig) -> Self {
        Self {
            bills_percentage: config.bills_percentage,
            spending_percentage: config.spending_percentage,
            savings_percentage: config.savings_percentage,
            bills_bucket_balance: config.bills_bucket_balance,
        }
    }
}

/// One `[[incomes]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeConfig {
    /// Name of the income
    pub name: String,
    /// Expected paycheck
    pub paycheck_amount: Decimal,
    /// Pay schedule
    pub pay_frequency: PayFrequency,
    /// Next payday, if known
    #[serde(default)]
    pub next_payday: Option<NaiveDate>,
    /// Whether this income drives the payday cycle
    #[serde(default)]
    pub is_primary: bool,
}

impl From<&IncomeConfig> for Income {
    fn from(config: &IncomeConfig) -> Self {
        Self {
            id: 0,
            name: config.name.clone(),
            paycheck_amount: config.paycheck_amount,
            pay_frequency: config.pay_frequency,
            next_payday: config.next_payday,
            is_primary: config.is_primary,
        }
    }
}

fn default_category() -> String {
    "other".to_string()
}

/// One `[[bills]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct BillConfig {
    /// Name of the bill
    pub name: String,
    /// Amount due
    pub amount: Decimal,
    /// Due date
    pub due_date: NaiveDate,
    /// End of the grace period
    #[serde(default)]
    pub late_by_date: Option<NaiveDate>,
    /// Whether the biller charges automatically
    #[serde(default)]
    pub is_autopay: bool,
    /// Recurrence; omit for a one-time bill
    #[serde(default)]
    pub frequency: Option<BillFrequency>,
    /// Grouping for display
    #[serde(default = "default_category")]
    pub category: String,
}

impl From<&BillConfig> for Bill {
    fn from(config: &BillConfig) -> Self {
        Self {
            id: 0,
            name: config.name.clone(),
            amount: config.amount,
            due_date: config.due_date,
            late_by_date: config.late_by_date,
            is_autopay: config.is_autopay,
            allocated_amount: Decimal::ZERO,
            last_paid_date: None,
            last_allocated_date: None,
            frequency: config.frequency,
            category: config.category.clone(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration, treating a missing file as an empty (all-defaults) config.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!("No config file at {}; using defaults", path_ref.display());
        Ok(Config::default())
    }
}

/// What seeding wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// The store already had data, so nothing was written
    pub skipped: bool,
    /// Incomes inserted
    pub incomes: usize,
    /// Bills inserted
    pub bills: usize,
}

/// Seeds an empty store from `config`.
///
/// Nothing is written once the store holds any income or bill, so running
/// seed again never duplicates rows or resets the carry-forward.
pub async fn seed_store(db: &DatabaseConnection, config: &Config) -> Result<SeedSummary> {
    let existing_incomes = IncomeEntity::find().count(db).await?;
    let existing_bills = BillEntity::find().count(db).await?;
    if existing_incomes > 0 || existing_bills > 0 {
        info!(
            existing_incomes,
            existing_bills, "Store already has data; skipping seed"
        );
        return Ok(SeedSummary {
            skipped: true,
            incomes: 0,
            bills: 0,
        });
    }

    budget_store::save_buckets(db, &BudgetBuckets::from(&config.budget)).await?;
    for income in &config.incomes {
        income_store::create_income(db, &Income::from(income)).await?;
    }
    for bill in &config.bills {
        bill_store::create_bill(db, &Bill::from(bill)).await?;
    }

    info!(
        incomes = config.incomes.len(),
        bills = config.bills.len(),
        "Seeded store from configuration"
    );
    Ok(SeedSummary {
        skipped: false,
        incomes: config.incomes.len(),
        bills: config.bills.len(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [budget]
        bills_percentage = 55
        spending_percentage = 25.5
        savings_percentage = 19.5

        [[incomes]]
        name = "Day job"
        paycheck_amount = 2000
        pay_frequency = "biweekly"
        next_payday = "2024-03-01"
        is_primary = true

        [[bills]]
        name = "Rent"
        amount = 1200
        due_date = "2024-03-05"
        late_by_date = "2024-03-10"
        frequency = "monthly"
        category = "housing"

        [[bills]]
        name = "Streaming"
        amount = 15.99
        due_date = "2024-03-03"
        is_autopay = true
    "#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.budget.bills_percentage, Decimal::from(55));
        assert_eq!(config.budget.spending_percentage, Decimal::new(255, 1));
        assert_eq!(config.budget.bills_bucket_balance, Decimal::ZERO);

        assert_eq!(config.incomes.len(), 1);
        assert_eq!(config.incomes[0].pay_frequency, PayFrequency::Biweekly);
        assert_eq!(config.incomes[0].next_payday, Some(date(2024, 3, 1)));

        assert_eq!(config.bills.len(), 2);
        assert_eq!(config.bills[0].frequency, Some(BillFrequency::Monthly));
        assert_eq!(config.bills[0].late_by_date, Some(date(2024, 3, 10)));
        assert_eq!(config.bills[1].category, "other");
        assert!(config.bills[1].is_autopay);
        assert!(config.bills[1].frequency.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(BudgetBuckets::from(&config.budget), BudgetBuckets::default());
        assert!(config.incomes.is_empty());
        assert!(config.bills.is_empty());
    }

    #[test]
    fn test_parse_config_rejects_unknown_frequency() {
        let bad = r#"
            [[incomes]]
            name = "Gig"
            paycheck_amount = 100
            pay_frequency = "hourly"
        "#;
        assert!(matches!(parse_config(bad), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.incomes[0].name, "Day job");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(load_config(&missing), Err(Error::Config { .. })));
        let config = load_config_or_default(&missing).unwrap();
        assert!(config.incomes.is_empty());
    }

    #[tokio::test]
    async fn test_seed_store_only_once() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SAMPLE)?;

        let first = seed_store(&db, &config).await?;
        assert_eq!(
            first,
            SeedSummary {
                skipped: false,
                incomes: 1,
                bills: 2
            }
        );

        budget_store::set_bills_bucket_balance(&db, Decimal::from(75)).await?;
        let second = seed_store(&db, &config).await?;
        assert!(second.skipped);
        assert_eq!(second.incomes, 0);

        let bills = bill_store::get_all_bills(&db).await?;
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[1].amount, Decimal::new(1599, 2));

        let buckets = budget_store::get_buckets(&db).await?;
        assert_eq!(buckets.bills_percentage, Decimal::from(55));
        assert_eq!(buckets.bills_bucket_balance, Decimal::from(75));

        Ok(())
    }
}
