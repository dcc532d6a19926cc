//! Shared test utilities for the payday planner.
//!
//! This module provides builders for domain records with sensible defaults and
//! helpers for setting up an in-memory store.

use crate::{
    core::{bill as bill_store, budget as budget_store, income as income_store},
    entities,
    errors::Result,
    models::{Bill, BudgetBuckets, Income, OneTimeDeposit, PayFrequency},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Builds a date, panicking on invalid input.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a biweekly primary income paying whole `dollars` on `payday`.
pub fn income(dollars: i64, payday: NaiveDate) -> Income {
    Income {
        id: 1,
        name: "Day job".to_string(),
        paycheck_amount: Decimal::from(dollars),
        pay_frequency: PayFrequency::Biweekly,
        next_payday: Some(payday),
        is_primary: true,
    }
}

/// Creates a manual-pay, one-time bill for whole `dollars` with no grace period.
pub fn bill(id: i64, name: &str, dollars: i64, due_date: NaiveDate) -> Bill {
    Bill {
        id,
        name: name.to_string(),
        amount: Decimal::from(dollars),
        due_date,
        late_by_date: None,
        is_autopay: false,
        allocated_amount: Decimal::ZERO,
        last_paid_date: None,
        last_allocated_date: None,
        frequency: None,
        category: "other".to_string(),
    }
}

/// Creates bucket settings from whole-number percentages and a whole-dollar balance.
pub fn buckets(bills: i64, spending: i64, savings: i64, balance: i64) -> BudgetBuckets {
    BudgetBuckets {
        bills_percentage: Decimal::from(bills),
        spending_percentage: Decimal::from(spending),
        savings_percentage: Decimal::from(savings),
        bills_bucket_balance: Decimal::from(balance),
    }
}

/// Creates a pending one-time deposit of whole `dollars`.
pub fn deposit(name: &str, dollars: i64, expected_date: NaiveDate) -> OneTimeDeposit {
    OneTimeDeposit {
        id: 0,
        name: name.to_string(),
        amount: Decimal::from(dollars),
        expected_date,
        received: false,
    }
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Stores `income` and returns the stored row.
pub async fn store_income(db: &DatabaseConnection, income: &Income) -> Result<entities::income::Model> {
    income_store::create_income(db, income).await
}

/// Stores `bill` and returns it with its assigned id.
pub async fn store_bill(db: &DatabaseConnection, bill: &Bill) -> Result<Bill> {
    bill_store::create_bill(db, bill).await
}

/// Sets up a store with the March 2024 walkthrough data:
/// a $2000 biweekly income paid 2024-03-01, 50/30/20 buckets, and two bills.
///
/// Returns (db, bills) with the stored bill ids.
pub async fn setup_march_store() -> Result<(DatabaseConnection, Vec<Bill>)> {
    let db = setup_test_db().await?;
    store_income(&db, &income(2000, date(2024, 3, 1))).await?;
    budget_store::save_buckets(&db, &BudgetBuckets::default()).await?;

    let mut rent = bill(0, "Rent", 1200, date(2024, 3, 5));
    rent.late_by_date = Some(date(2024, 3, 10));
    rent.frequency = Some(crate::models::BillFrequency::Monthly);

    let mut power = bill(0, "Power", 300, date(2024, 3, 1));
    power.frequency = Some(crate::models::BillFrequency::Monthly);

    let stored = vec![store_bill(&db, &power).await?, store_bill(&db, &rent).await?];
    Ok((db, stored))
}
