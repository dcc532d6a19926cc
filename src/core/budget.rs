//! Budget store operations.
//!
//! The store keeps one budget row holding the bucket percentages and the
//! bills carry-forward. It is created with 50/30/20 defaults on first access.

use crate::{
    core::validation,
    entities::{Budget as BudgetEntity, budget},
    errors::Result,
    models::{BudgetBuckets, money_from_f64, money_to_f64},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

impl TryFrom<budget::Model> for BudgetBuckets {
    type Error = crate::errors::Error;

    fn try_from(model: budget::Model) -> Result<Self> {
        Ok(Self {
            bills_percentage: money_from_f64(model.bills_percentage)?,
            spending_percentage: money_from_f64(model.spending_percentage)?,
            savings_percentage: money_from_f64(model.savings_percentage)?,
            bills_bucket_balance: money_from_f64(model.bills_bucket_balance)?,
        })
    }
}

/// Returns the budget row, inserting one with default buckets if none exists.
pub async fn get_or_create_budget<C>(db: &C) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = BudgetEntity::find()
        .order_by_asc(budget::Column::Id)
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let defaults = BudgetBuckets::default();
    let model = budget::ActiveModel {
        bills_percentage: Set(money_to_f64(defaults.bills_percentage)?),
        spending_percentage: Set(money_to_f64(defaults.spending_percentage)?),
        savings_percentage: Set(money_to_f64(defaults.savings_percentage)?),
        bills_bucket_balance: Set(0.0),
        updated_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    info!("Created default 50/30/20 budget");
    model.insert(db).await.map_err(Into::into)
}

/// Reads the current bucket settings.
pub async fn get_buckets(db: &DatabaseConnection) -> Result<BudgetBuckets> {
    BudgetBuckets::try_from(get_or_create_budget(db).await?)
}

/// Replaces percentages and carry-forward after validating them.
pub async fn save_buckets(db: &DatabaseConnection, buckets: &BudgetBuckets) -> Result<BudgetBuckets> {
    validation::validate_buckets(buckets)?;

    let mut active_model: budget::ActiveModel = get_or_create_budget(db).await?.into();
    active_model.bills_percentage = Set(money_to_f64(buckets.bills_percentage)?);
    active_model.spending_percentage = Set(money_to_f64(buckets.spending_percentage)?);
    active_model.savings_percentage = Set(money_to_f64(buckets.savings_percentage)?);
    active_model.bills_bucket_balance = Set(money_to_f64(buckets.bills_bucket_balance)?);
    active_model.updated_at = Set(Utc::now().naive_utc());

    let updated = active_model.update(db).await?;
    debug!(
        bills = updated.bills_percentage,
        spending = updated.spending_percentage,
        savings = updated.savings_percentage,
        "Saved budget buckets"
    );
    BudgetBuckets::try_from(updated)
}

/// Overwrites the bills carry-forward. Writing the same value twice is harmless.
pub async fn set_bills_bucket_balance<C>(db: &C, balance: Decimal) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut active_model: budget::ActiveModel = get_or_create_budget(db).await?.into();
    active_model.bills_bucket_balance = Set(money_to_f64(balance)?);
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await?;
    Ok(())
}
