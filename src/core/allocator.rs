//! Payday allocation.
//!
//! Splits one paycheck into bills, spending, and savings buckets, then walks
//! the eligible bills in priority order and pays each one that still fits in
//! the bills bucket. Whatever is left becomes the next cycle's carry-forward.
//!
//! The allocator is a pure function of its inputs. Persisting the outcome is
//! the job of [`crate::core::completion`].

use crate::{
    core::{schedule, validation},
    errors::{Error, Result},
    models::{Bill, BudgetBuckets, Income},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Whether the plan came from a configured income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    /// A primary income with a payday and a positive paycheck was found
    Planned,
    /// No usable income; every amount is zero and no bills are listed
    NoIncomeConfigured,
}

/// One computed payday cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaydayCycle {
    /// Planned or zeroed
    pub status: PlanStatus,
    /// Income that drove the plan
    pub income_id: Option<i64>,
    /// The day the plan was computed
    pub cycle_start: NaiveDate,
    /// The upcoming payday, inclusive
    pub cycle_end: NaiveDate,
    /// The payday after `cycle_end`
    pub next_cycle_end: NaiveDate,
    /// Paycheck being split
    pub paycheck_amount: Decimal,
    /// Bills share of the paycheck plus the carried-forward balance
    pub bills_bucket_amount: Decimal,
    /// Spending share of the paycheck
    pub spending_bucket_amount: Decimal,
    /// Savings share of the paycheck
    pub savings_bucket_amount: Decimal,
    /// Bills accepted, in the order they were paid
    pub bills_paid: Vec<Bill>,
    /// Eligible bills that did not fit, in priority order
    pub bills_deferred: Vec<Bill>,
    /// Bills bucket left after paying; becomes the next carry-forward
    pub bills_bucket_remainder: Decimal,
}

impl PaydayCycle {
    /// The inert plan returned when no income is configured.
    #[must_use]
    pub const fn zeroed(today: NaiveDate) -> Self {
        Self {
            status: PlanStatus::NoIncomeConfigured,
            income_id: None,
            cycle_start: today,
            cycle_end: today,
            next_cycle_end: today,
            paycheck_amount: Decimal::ZERO,
            bills_bucket_amount: Decimal::ZERO,
            spending_bucket_amount: Decimal::ZERO,
            savings_bucket_amount: Decimal::ZERO,
            bills_paid: Vec::new(),
            bills_deferred: Vec::new(),
            bills_bucket_remainder: Decimal::ZERO,
        }
    }

    /// True when the plan was computed from a real income.
    #[must_use]
    pub fn is_planned(&self) -> bool {
        self.status == PlanStatus::Planned
    }

    /// Total of the bills accepted this cycle.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.bills_paid.iter().map(|b| b.amount).sum()
    }

    /// Total of the eligible bills that did not fit.
    #[must_use]
    pub fn total_deferred(&self) -> Decimal {
        self.bills_deferred.iter().map(|b| b.amount).sum()
    }
}

/// Picks the income that drives the cycle: the first flagged primary, else the first.
#[must_use]
pub fn select_primary_income(incomes: &[Income]) -> Option<&Income> {
    incomes
        .iter()
        .find(|i| i.is_primary)
        .or_else(|| incomes.first())
}

/// Applies a percentage to an amount.
fn share(amount: Decimal, percentage: Decimal) -> Result<Decimal> {
    percentage
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| amount.checked_mul(fraction))
        .ok_or_else(|| {
            Error::invalid_budget(format!("{percentage}% of {amount} is out of range"))
        })
}

/// Whether a bill must be considered this cycle.
///
/// Autopay and grace-period deadlines look one cycle ahead (through
/// `next_cycle_end`) so a charge landing before the following payday is
/// funded now. Plain due dates only look through `cycle_end`.
#[must_use]
pub fn is_eligible(
    bill: &Bill,
    today: NaiveDate,
    cycle_end: NaiveDate,
    next_cycle_end: NaiveDate,
) -> bool {
    (bill.is_autopay && bill.due_date <= next_cycle_end)
        || bill.effective_late_by() <= next_cycle_end
        || (today <= bill.due_date && bill.due_date <= cycle_end)
}

/// Sorts bills for payment: autopay first, then earliest grace deadline.
///
/// The sort is stable, so bills that compare equal keep their input order.
pub fn sort_by_priority(bills: &mut [Bill]) {
    bills.sort_by_key(|b| (!b.is_autopay, b.effective_late_by()));
}

/// Computes one payday cycle.
///
/// Returns a zeroed [`PlanStatus::NoIncomeConfigured`] cycle, not an error,
/// when `primary_income` is missing, has no payday, or has a zero paycheck.
///
/// # Errors
/// Returns [`Error::InvalidBudgetConfiguration`] when the paycheck is
/// negative, a percentage is outside 0-100, the carry-forward is negative, a
/// bill has a negative amount or a grace period ending before its due date, or
/// a bucket amount does not fit in a `Decimal`.
pub fn allocate(
    today: NaiveDate,
    primary_income: Option<&Income>,
    buckets: &BudgetBuckets,
    bills: &[Bill],
) -> Result<PaydayCycle> {
    let Some((income, cycle_end)) =
        primary_income.and_then(|i| i.next_payday.map(|payday| (i, payday)))
    else {
        info!("No income with a payday configured; returning empty plan");
        return Ok(PaydayCycle::zeroed(today));
    };

    validation::validate_income(income)?;
    if income.paycheck_amount.is_zero() {
        info!(income = %income.name, "Paycheck amount is zero; returning empty plan");
        return Ok(PaydayCycle::zeroed(today));
    }

    validation::validate_buckets(buckets)?;
    for bill in bills {
        validation::validate_bill(bill)?;
    }

    if buckets.percentage_total() != Decimal::ONE_HUNDRED {
        warn!(
            total = %buckets.percentage_total(),
            "Bucket percentages do not add up to 100"
        );
    }

    let next_cycle_end = schedule::next_payday(cycle_end, income.pay_frequency)?;
    let paycheck = income.paycheck_amount;
    let bills_bucket_amount = share(paycheck, buckets.bills_percentage)?
        .checked_add(buckets.bills_bucket_balance)
        .ok_or_else(|| {
            Error::invalid_budget(format!(
                "bills bucket plus carry-forward {} is out of range",
                buckets.bills_bucket_balance
            ))
        })?;
    let spending_bucket_amount = share(paycheck, buckets.spending_percentage)?;
    let savings_bucket_amount = share(paycheck, buckets.savings_percentage)?;

    let mut eligible: Vec<Bill> = bills
        .iter()
        .filter(|b| is_eligible(b, today, cycle_end, next_cycle_end))
        .cloned()
        .collect();
    sort_by_priority(&mut eligible);

    let mut remaining = bills_bucket_amount;
    let mut bills_paid = Vec::new();
    let mut bills_deferred = Vec::new();
    for bill in eligible {
        if bill.amount <= remaining {
            remaining -= bill.amount;
            debug!(bill = %bill.name, amount = %bill.amount, %remaining, "Paying bill");
            bills_paid.push(bill);
        } else {
            debug!(bill = %bill.name, amount = %bill.amount, %remaining, "Deferring bill");
            bills_deferred.push(bill);
        }
    }

    info!(
        %cycle_end,
        %next_cycle_end,
        paid = bills_paid.len(),
        deferred = bills_deferred.len(),
        remainder = %remaining,
        "Computed payday plan"
    );

    Ok(PaydayCycle {
        status: PlanStatus::Planned,
        income_id: Some(income.id),
        cycle_start: today,
        cycle_end,
        next_cycle_end,
        paycheck_amount: paycheck,
        bills_bucket_amount,
        spending_bucket_amount,
        savings_bucket_amount,
        bills_paid,
        bills_deferred,
        bills_bucket_remainder: remaining,
    })
}
