//! Payday completion.
//!
//! Persists a computed [`PaydayCycle`]: the history snapshot, each paid
//! bill's allocation, the income's next payday, and the bills carry-forward.
//! All four writes happen in one database transaction, and every write is
//! keyed by the payday date so running completion twice changes nothing the
//! second time.

use crate::{
    core::{
        allocator::{PaydayCycle, PlanStatus},
        bill, budget, history, income,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

/// What completion wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    /// ID of the new history row
    pub history_id: i64,
    /// Payday that was completed
    pub payday_date: NaiveDate,
    /// Bills whose allocation was recorded
    pub bills_recorded: usize,
    /// Bills already stamped with this payday and left untouched
    pub bills_skipped: usize,
    /// Whether the income's next payday was moved
    pub income_advanced: bool,
    /// The income's next payday after completion
    pub next_payday: NaiveDate,
    /// Carry-forward written to the budget
    pub bills_bucket_balance: Decimal,
}

/// Result of a completion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The payday was recorded
    Completed(CompletionSummary),
    /// A history row for this payday already exists; nothing was written
    AlreadyCompleted {
        /// Payday that had been completed before
        payday_date: NaiveDate,
    },
}

/// Records a planned payday.
///
/// In one transaction this pays the selected bills, stores the history row,
/// writes the carry-forward, and moves the income to its next payday.
///
/// # Arguments
/// * `db` - Database connection
/// * `cycle` - The plan to record, as returned by the planner
///
/// # Returns
/// * `Ok(CompletionOutcome::Completed(_))` - Everything was written
/// * `Ok(CompletionOutcome::AlreadyCompleted { .. })` - This payday was
///   recorded before and nothing changed
///
/// # Errors
/// Returns [`Error::Config`] for a [`PlanStatus::NoIncomeConfigured`] plan,
/// and database errors from any of the writes; on error nothing is committed.
pub async fn complete_payday(
    db: &DatabaseConnection,
    cycle: &PaydayCycle,
) -> Result<CompletionOutcome> {
    let (PlanStatus::Planned, Some(income_id)) = (cycle.status, cycle.income_id) else {
        return Err(Error::Config {
            message: "Cannot complete a payday without a configured income".to_string(),
        });
    };
    let payday_date = cycle.cycle_end;

    let txn = db.begin().await?;

    if history::find_by_payday(&txn, payday_date).await?.is_some() {
        warn!(%payday_date, "Payday already completed; skipping");
        return Ok(CompletionOutcome::AlreadyCompleted { payday_date });
    }

    let snapshot = history::record_cycle(&txn, cycle).await?;

    let mut bills_recorded = 0;
    let mut bills_skipped = 0;
    for paid in &cycle.bills_paid {
        if bill::record_payment(&txn, paid.id, payday_date).await? {
            bills_recorded += 1;
        } else {
            bills_skipped += 1;
        }
    }

    let income_advanced =
        income::advance_next_payday(&txn, income_id, payday_date, cycle.next_cycle_end).await?;

    budget::set_bills_bucket_balance(&txn, cycle.bills_bucket_remainder).await?;

    // All writes succeed or none do
    txn.commit().await?;

    info!(
        %payday_date,
        next_payday = %cycle.next_cycle_end,
        bills_recorded,
        bills_skipped,
        carry_forward = %cycle.bills_bucket_remainder,
        "Payday completed"
    );

    Ok(CompletionOutcome::Completed(CompletionSummary {
        history_id: snapshot.id,
        payday_date,
        bills_recorded,
        bills_skipped,
        income_advanced,
        next_payday: cycle.next_cycle_end,
        bills_bucket_balance: cycle.bills_bucket_remainder,
    }))
}
