//! Payday history.
//!
//! Each completed payday leaves one `payday_history` row plus one
//! `payday_history_bills` row per bill paid. History is for display only;
//! planning never reads it.

use crate::{
    core::allocator::PaydayCycle,
    entities::{PaydayHistory, PaydayHistoryBill, payday_history, payday_history_bill},
    errors::Result,
    models::money_to_f64,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// A completed payday with the bills it paid
#[derive(Debug, Clone)]
pub struct PaydayRecord {
    /// The payday snapshot
    pub payday: payday_history::Model,
    /// Bills paid on that payday
    pub bills: Vec<payday_history_bill::Model>,
}

/// Finds the history row for a payday, if that payday was completed.
pub async fn find_by_payday<C>(db: &C, payday_date: NaiveDate) -> Result<Option<payday_history::Model>>
where
    C: ConnectionTrait,
{
    PaydayHistory::find()
        .filter(payday_history::Column::PaydayDate.eq(payday_date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Writes the snapshot of `cycle` and a line for each paid bill.
pub async fn record_cycle<C>(db: &C, cycle: &PaydayCycle) -> Result<payday_history::Model>
where
    C: ConnectionTrait,
{
    let snapshot = payday_history::ActiveModel {
        payday_date: Set(cycle.cycle_end),
        paycheck_amount: Set(money_to_f64(cycle.paycheck_amount)?),
        bills_amount: Set(money_to_f64(cycle.bills_bucket_amount)?),
        spending_amount: Set(money_to_f64(cycle.spending_bucket_amount)?),
        savings_amount: Set(money_to_f64(cycle.savings_bucket_amount)?),
        bills_unallocated: Set(money_to_f64(cycle.bills_bucket_remainder)?),
        completed_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for bill in &cycle.bills_paid {
        let amount = money_to_f64(bill.amount)?;
        payday_history_bill::ActiveModel {
            payday_history_id: Set(snapshot.id),
            bill_name: Set(bill.name.clone()),
            amount_due: Set(amount),
            amount_allocated: Set(amount),
            due_date: Set(bill.due_date),
            was_autopay: Set(bill.is_autopay),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(snapshot)
}

/// Lists completed paydays, newest first.
pub async fn get_recent_history(db: &DatabaseConnection, limit: u64) -> Result<Vec<PaydayRecord>> {
    let paydays = PaydayHistory::find()
        .order_by_desc(payday_history::Column::PaydayDate)
        .limit(limit)
        .all(db)
        .await?;

    let mut records = Vec::with_capacity(paydays.len());
    for payday in paydays {
        let bills = PaydayHistoryBill::find()
            .filter(payday_history_bill::Column::PaydayHistoryId.eq(payday.id))
            .order_by_asc(payday_history_bill::Column::Id)
            .all(db)
            .await?;
        records.push(PaydayRecord { payday, bills });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::allocator::allocate, test_utils::*};

    fn march_cycle() -> PaydayCycle {
        let mut rent = bill(2, "Rent", 1200, date(2024, 3, 5));
        rent.late_by_date = Some(date(2024, 3, 10));
        let mut power = bill(1, "Power", 300, date(2024, 3, 1));
        power.is_autopay = true;

        allocate(
            date(2024, 2, 20),
            Some(&income(2000, date(2024, 3, 1))),
            &buckets(50, 30, 20, 0),
            &[power, rent],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_cycle_writes_snapshot_and_lines() -> Result<()> {
        let db = setup_test_db().await?;
        let cycle = march_cycle();

        let snapshot = record_cycle(&db, &cycle).await?;
        assert_eq!(snapshot.payday_date, date(2024, 3, 1));
        assert_eq!(snapshot.bills_amount, 1000.0);
        assert_eq!(snapshot.bills_unallocated, 700.0);

        let history = get_recent_history(&db, 10).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].bills.len(), 1);
        assert_eq!(history[0].bills[0].bill_name, "Power");
        assert!(history[0].bills[0].was_autopay);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_payday() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(find_by_payday(&db, date(2024, 3, 1)).await?.is_none());

        record_cycle(&db, &march_cycle()).await?;
        assert!(find_by_payday(&db, date(2024, 3, 1)).await?.is_some());
        assert!(find_by_payday(&db, date(2024, 3, 15)).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_recent_history_newest_first_and_limited() -> Result<()> {
        let db = setup_test_db().await?;
        for payday in [date(2024, 2, 2), date(2024, 3, 1), date(2024, 2, 16)] {
            let mut cycle = march_cycle();
            cycle.cycle_end = payday;
            record_cycle(&db, &cycle).await?;
        }

        let history = get_recent_history(&db, 2).await?;
        let dates: Vec<NaiveDate> = history.iter().map(|r| r.payday.payday_date).collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 2, 16)]);

        Ok(())
    }
}
