//! Database configuration module for the payday planner.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{Bill, Budget, Income, OneTimeDeposit, PaydayHistory, PaydayHistoryBill};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/payday_planner.sqlite?mode=rwc";

/// Gets the database URL from the environment, falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Returns the file path of a file-backed `SQLite` URL, or `None` for in-memory databases.
#[must_use]
pub fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(path))
}

/// Connects to `database_url` and makes sure every table exists.
///
/// For file-backed `SQLite` the parent directory is created first.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Database ready");
    Ok(db)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let table = entity.table_name().to_string();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    debug!(%table, "Ensured table exists");
    Ok(())
}

/// Creates all tables from the entity definitions, skipping ones that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Income).await?;
    create_table(db, &schema, Bill).await?;
    create_table(db, &schema, Budget).await?;
    create_table(db, &schema, PaydayHistory).await?;
    create_table(db, &schema, PaydayHistoryBill).await?;
    create_table(db, &schema, OneTimeDeposit).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        bill::Model as BillModel, budget::Model as BudgetModel, income::Model as IncomeModel,
        one_time_deposit::Model as OneTimeDepositModel,
        payday_history::Model as PaydayHistoryModel,
        payday_history_bill::Model as PaydayHistoryBillModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<IncomeModel> = Income::find().limit(1).all(&db).await?;
        let _: Vec<BillModel> = Bill::find().limit(1).all(&db).await?;
        let _: Vec<BudgetModel> = Budget::find().limit(1).all(&db).await?;
        let _: Vec<PaydayHistoryModel> = PaydayHistory::find().limit(1).all(&db).await?;
        let _: Vec<PaydayHistoryBillModel> = PaydayHistoryBill::find().limit(1).all(&db).await?;
        let _: Vec<OneTimeDepositModel> = OneTimeDeposit::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        let _: Vec<IncomeModel> = Income::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path(DEFAULT_DATABASE_URL),
            Some(Path::new("data/payday_planner.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:budget.db"),
            Some(Path::new("budget.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }
}
