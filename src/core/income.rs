//! Income store operations.
//!
//! Incomes are kept in the `incomes` table; the allocator only ever sees the
//! primary one, converted into a [`crate::models::Income`].

use crate::{
    core::{allocator, validation},
    entities::{Income as IncomeEntity, income},
    errors::{Error, Result},
    models::{Income, money_to_f64},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Inserts a new income after checking the paycheck is not negative.
pub async fn create_income(db: &DatabaseConnection, new_income: &Income) -> Result<income::Model> {
    if new_income.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Income name cannot be empty".to_string(),
        });
    }
    validation::validate_income(new_income)?;

    let model = income::ActiveModel {
        name: Set(new_income.name.trim().to_string()),
        paycheck_amount: Set(money_to_f64(new_income.paycheck_amount)?),
        pay_frequency: Set(new_income.pay_frequency.as_str().to_string()),
        next_payday: Set(new_income.next_payday),
        is_primary: Set(new_income.is_primary),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    debug!(id = result.id, name = %result.name, "Created income");
    Ok(result)
}

/// Retrieves every income in insertion order.
pub async fn get_all_incomes(db: &DatabaseConnection) -> Result<Vec<Income>> {
    IncomeEntity::find()
        .order_by_asc(income::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Income::try_from)
        .collect()
}

/// Retrieves the income that drives the payday cycle, if any.
///
/// The first income flagged primary wins; otherwise the oldest income is used.
pub async fn get_primary_income(db: &DatabaseConnection) -> Result<Option<Income>> {
    let incomes = get_all_incomes(db).await?;
    Ok(allocator::select_primary_income(&incomes).cloned())
}

/// Finds an income by id.
pub async fn get_income_by_id(db: &DatabaseConnection, income_id: i64) -> Result<Option<Income>> {
    IncomeEntity::find_by_id(income_id)
        .one(db)
        .await?
        .map(Income::try_from)
        .transpose()
}

/// Replaces the editable fields of the income whose id is `updated.id`.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The paycheck is negative
/// - No income has that id
/// - The database update operation fails
pub async fn update_income(db: &DatabaseConnection, updated: &Income) -> Result<Income> {
    if updated.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Income name cannot be empty".to_string(),
        });
    }
    validation::validate_income(updated)?;

    let mut active_model: income::ActiveModel = IncomeEntity::find_by_id(updated.id)
        .one(db)
        .await?
        .ok_or(Error::IncomeNotFound { id: updated.id })?
        .into();

    active_model.name = Set(updated.name.trim().to_string());
    active_model.paycheck_amount = Set(money_to_f64(updated.paycheck_amount)?);
    active_model.pay_frequency = Set(updated.pay_frequency.as_str().to_string());
    active_model.next_payday = Set(updated.next_payday);
    active_model.is_primary = Set(updated.is_primary);

    let result = active_model.update(db).await?;
    info!(id = result.id, name = %result.name, "Updated income");
    Income::try_from(result)
}

/// Removes an income.
///
/// # Errors
/// Returns [`Error::IncomeNotFound`] if no income has that id.
pub async fn delete_income(db: &DatabaseConnection, income_id: i64) -> Result<()> {
    let result = IncomeEntity::delete_by_id(income_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::IncomeNotFound { id: income_id });
    }
    info!(id = income_id, "Deleted income");
    Ok(())
}

/// Moves an income's next payday, but only if it still equals `expected`.
///
/// Completion calls this inside its transaction; the guard on `expected`
/// keeps a retried completion from skipping a payday.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `income_id` - ID of the income that drove the cycle
/// * `expected` - The payday being completed
/// * `next` - The payday after it
///
/// # Returns
/// * `Ok(true)` - The next payday was moved to `next`
/// * `Ok(false)` - The income had already moved past `expected`; nothing written
pub async fn advance_next_payday<C>(
    db: &C,
    income_id: i64,
    expected: NaiveDate,
    next: NaiveDate,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let existing = IncomeEntity::find_by_id(income_id)
        .one(db)
        .await?
        .ok_or(Error::IncomeNotFound { id: income_id })?;

    if existing.next_payday != Some(expected) {
        debug!(income_id, next_payday = ?existing.next_payday, "Next payday already advanced");
        return Ok(false);
    }

    let mut active_model: income::ActiveModel = existing.into();
    active_model.next_payday = Set(Some(next));
    active_model.update(db).await?;
    Ok(true)
}
