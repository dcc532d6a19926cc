//! One-time deposit store operations.
//!
//! Deposits are informational: the plan lists the pending ones so the user
//! knows extra money is coming, but the allocator never counts them.

use crate::{
    entities::{OneTimeDeposit as DepositEntity, one_time_deposit},
    errors::{Error, Result},
    models::{OneTimeDeposit, money_to_f64},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Records an expected deposit. New deposits always start unreceived.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The amount is negative
/// - The database insert fails
pub async fn create_deposit(
    db: &DatabaseConnection,
    new_deposit: &OneTimeDeposit,
) -> Result<OneTimeDeposit> {
    if new_deposit.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Deposit name cannot be empty".to_string(),
        });
    }
    if new_deposit.amount.is_sign_negative() && !new_deposit.amount.is_zero() {
        return Err(Error::InvalidAmount {
            amount: new_deposit.amount,
        });
    }

    let model = one_time_deposit::ActiveModel {
        name: Set(new_deposit.name.trim().to_string()),
        amount: Set(money_to_f64(new_deposit.amount)?),
        expected_date: Set(new_deposit.expected_date),
        received: Set(false),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    debug!(id = result.id, name = %result.name, "Created deposit");
    OneTimeDeposit::try_from(result)
}

/// Lists deposits not yet received, soonest first.
pub async fn get_pending_deposits(db: &DatabaseConnection) -> Result<Vec<OneTimeDeposit>> {
    DepositEntity::find()
        .filter(one_time_deposit::Column::Received.eq(false))
        .order_by_asc(one_time_deposit::Column::ExpectedDate)
        .order_by_asc(one_time_deposit::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(OneTimeDeposit::try_from)
        .collect()
}

/// Marks a deposit as received so it drops off the plan.
///
/// # Returns
/// * `Ok(true)` - The deposit was pending and is now received
/// * `Ok(false)` - It was already received
pub async fn mark_received(db: &DatabaseConnection, deposit_id: i64) -> Result<bool> {
    let existing = DepositEntity::find_by_id(deposit_id)
        .one(db)
        .await?
        .ok_or(Error::DepositNotFound { id: deposit_id })?;

    if existing.received {
        return Ok(false);
    }

    let mut active_model: one_time_deposit::ActiveModel = existing.into();
    active_model.received = Set(true);
    let updated = active_model.update(db).await?;
    info!(id = updated.id, name = %updated.name, "Deposit received");
    Ok(true)
}

/// Removes a deposit.
pub async fn delete_deposit(db: &DatabaseConnection, deposit_id: i64) -> Result<()> {
    let result = DepositEntity::delete_by_id(deposit_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::DepositNotFound { id: deposit_id });
    }
    info!(id = deposit_id, "Deleted deposit");
    Ok(())
}
