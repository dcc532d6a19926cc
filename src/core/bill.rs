//! Bill store operations.
//!
//! Provides creation and listing of bills, plus the per-bill write performed
//! when a payday is completed.

use crate::{
    core::{schedule, validation},
    entities::{Bill as BillEntity, bill},
    errors::{Error, Result},
    models::{Bill, money_to_f64},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Inserts a new bill after validating its amount and grace period.
///
/// The stored bill starts with nothing allocated and no payment history,
/// regardless of what `new_bill` carries in those fields.
pub async fn create_bill(db: &DatabaseConnection, new_bill: &Bill) -> Result<Bill> {
    if new_bill.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Bill name cannot be empty".to_string(),
        });
    }
    validation::validate_bill(new_bill)?;

    let model = bill::ActiveModel {
        name: Set(new_bill.name.trim().to_string()),
        amount: Set(money_to_f64(new_bill.amount)?),
        due_date: Set(new_bill.due_date),
        late_by_date: Set(new_bill.late_by_date),
        is_autopay: Set(new_bill.is_autopay),
        allocated_amount: Set(0.0),
        last_paid_date: Set(None),
        last_allocated_date: Set(None),
        frequency: Set(new_bill.frequency.map(|f| f.as_str().to_string())),
        category: Set(new_bill.category.clone()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    debug!(id = result.id, name = %result.name, "Created bill");
    Bill::try_from(result)
}

/// Retrieves every bill in insertion order.
///
/// Insertion order is what the allocator uses to break priority ties.
pub async fn get_all_bills(db: &DatabaseConnection) -> Result<Vec<Bill>> {
    BillEntity::find()
        .order_by_asc(bill::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Bill::try_from)
        .collect()
}

/// Finds a bill by id.
pub async fn get_bill_by_id(db: &DatabaseConnection, bill_id: i64) -> Result<Option<Bill>> {
    BillEntity::find_by_id(bill_id)
        .one(db)
        .await?
        .map(Bill::try_from)
        .transpose()
}

/// Narrows a bill listing. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillFilter {
    /// Exact category; `"all"` is treated like `None`
    pub category: Option<String>,
    /// Case-insensitive substring of the bill name
    pub search: Option<String>,
}

/// Lists bills matching `filter`, in insertion order.
pub async fn find_bills(db: &DatabaseConnection, filter: &BillFilter) -> Result<Vec<Bill>> {
    let mut query = BillEntity::find().order_by_asc(bill::Column::Id);
    if let Some(category) = filter.category.as_deref().filter(|c| *c != "all") {
        query = query.filter(bill::Column::Category.eq(category));
    }

    let needle = filter.search.as_deref().map(str::to_lowercase);
    query
        .all(db)
        .await?
        .into_iter()
        .filter(|b| {
            needle
                .as_deref()
                .is_none_or(|n| b.name.to_lowercase().contains(n))
        })
        .map(Bill::try_from)
        .collect()
}

/// Replaces the editable fields of the bill whose id is `updated.id`.
///
/// Name, amount, dates, autopay, frequency and category change; the
/// allocation history (`allocated_amount`, `last_paid_date`,
/// `last_allocated_date`) is kept.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The amount is negative or the grace period ends before the due date
/// - No bill has that id
/// - The database update operation fails
pub async fn update_bill(db: &DatabaseConnection, updated: &Bill) -> Result<Bill> {
    if updated.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Bill name cannot be empty".to_string(),
        });
    }
    validation::validate_bill(updated)?;

    let mut active_model: bill::ActiveModel = BillEntity::find_by_id(updated.id)
        .one(db)
        .await?
        .ok_or(Error::BillNotFound { id: updated.id })?
        .into();

    active_model.name = Set(updated.name.trim().to_string());
    active_model.amount = Set(money_to_f64(updated.amount)?);
    active_model.due_date = Set(updated.due_date);
    active_model.late_by_date = Set(updated.late_by_date);
    active_model.is_autopay = Set(updated.is_autopay);
    active_model.frequency = Set(updated.frequency.map(|f| f.as_str().to_string()));
    active_model.category = Set(updated.category.clone());

    let result = active_model.update(db).await?;
    info!(id = result.id, name = %result.name, "Updated bill");
    Bill::try_from(result)
}

/// Removes a bill. Past payday history keeps its own copy of the bill name.
///
/// # Errors
/// Returns [`Error::BillNotFound`] if no bill has that id.
pub async fn delete_bill(db: &DatabaseConnection, bill_id: i64) -> Result<()> {
    let result = BillEntity::delete_by_id(bill_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BillNotFound { id: bill_id });
    }
    info!(id = bill_id, "Deleted bill");
    Ok(())
}

/// Records that a bill was paid on the payday `cycle_date`.
///
/// Adds the bill's amount to `allocated_amount`, stamps `last_paid_date` and
/// `last_allocated_date`, and rolls recurring bills to their next due date
/// (the grace period moves with it).
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `bill_id` - ID of the bill that was paid
/// * `cycle_date` - The payday the bill was paid from
///
/// # Returns
/// * `Ok(true)` - The payment was recorded
/// * `Ok(false)` - The bill was already stamped with `cycle_date`; nothing written
pub async fn record_payment<C>(db: &C, bill_id: i64, cycle_date: NaiveDate) -> Result<bool>
where
    C: ConnectionTrait,
{
    let existing = BillEntity::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or(Error::BillNotFound { id: bill_id })?;

    if existing.last_allocated_date == Some(cycle_date) {
        debug!(bill_id, %cycle_date, "Bill already allocated for this payday");
        return Ok(false);
    }

    let current = Bill::try_from(existing.clone())?;
    let allocated = current
        .allocated_amount
        .checked_add(current.amount)
        .ok_or(Error::InvalidAmount {
            amount: current.amount,
        })?;

    let mut active_model: bill::ActiveModel = existing.into();
    active_model.allocated_amount = Set(money_to_f64(allocated)?);
    active_model.last_paid_date = Set(Some(cycle_date));
    active_model.last_allocated_date = Set(Some(cycle_date));

    if let Some(frequency) = current.frequency {
        let next_due = schedule::next_occurrence(current.due_date, frequency)?;
        let next_late_by = current
            .late_by_date
            .map(|late_by| schedule::next_occurrence(late_by, frequency))
            .transpose()?;
        active_model.due_date = Set(next_due);
        active_model.late_by_date = Set(next_late_by);
        info!(bill = %current.name, %next_due, "Rolled recurring bill forward");
    }

    active_model.update(db).await?;
    Ok(true)
}

/// Dollars still owed across all bills: total amount less total allocated.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] if the running total leaves `Decimal` range.
pub fn total_unallocated(bills: &[Bill]) -> Result<Decimal> {
    bills.iter().try_fold(Decimal::ZERO, |total, b| {
        b.amount
            .checked_sub(b.allocated_amount)
            .and_then(|owed| total.checked_add(owed))
            .ok_or(Error::InvalidAmount { amount: b.amount })
    })
}
