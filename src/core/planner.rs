//! Loads the current snapshot from the store and runs the allocator on it.

use crate::{
    core::{allocator, allocator::PaydayCycle, bill, budget, income},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Plans the upcoming payday from what is currently stored.
///
/// Reads the primary income, the budget buckets (creating defaults if the
/// store has none), and every bill still owed, then delegates to
/// [`allocator::allocate`]. Settled one-time bills are left out.
pub async fn plan_payday(db: &DatabaseConnection, today: NaiveDate) -> Result<PaydayCycle> {
    let primary = income::get_primary_income(db).await?;
    let buckets = budget::get_buckets(db).await?;
    let mut bills = bill::get_all_bills(db).await?;
    let stored = bills.len();
    bills.retain(|b| !b.is_settled());
    debug!(
        has_income = primary.is_some(),
        bills = bills.len(),
        settled = stored - bills.len(),
        %today,
        "Loaded payday snapshot"
    );

    allocator::allocate(today, primary.as_ref(), &buckets, &bills)
}
