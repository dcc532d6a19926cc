//! Pay and bill schedule arithmetic.
//!
//! Monthly steps keep the day of month and clamp to the last day when the
//! target month is shorter, so Jan 31 + 1 month is Feb 28 (or Feb 29).

use crate::{
    errors::{Error, Result},
    models::{BillFrequency, PayFrequency},
};
use chrono::{Days, Months, NaiveDate};

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| Error::invalid_budget(format!("{date} + {days} days is out of range")))
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| Error::invalid_budget(format!("{date} + {months} months is out of range")))
}

/// Returns the payday that follows `payday` for the given pay frequency.
///
/// Irregular pay has no schedule, so the payday is returned unchanged.
pub fn next_payday(payday: NaiveDate, frequency: PayFrequency) -> Result<NaiveDate> {
    match frequency {
        PayFrequency::Weekly => add_days(payday, 7),
        PayFrequency::Biweekly => add_days(payday, 14),
        PayFrequency::Semimonthly => add_days(payday, 15),
        PayFrequency::Monthly => add_months(payday, 1),
        PayFrequency::Irregular => Ok(payday),
    }
}

/// Returns the next occurrence of a recurring bill date.
pub fn next_occurrence(date: NaiveDate, frequency: BillFrequency) -> Result<NaiveDate> {
    match frequency {
        BillFrequency::Weekly => add_days(date, 7),
        BillFrequency::Biweekly => add_days(date, 14),
        BillFrequency::Monthly => add_months(date, 1),
        BillFrequency::Quarterly => add_months(date, 3),
        BillFrequency::Annually => add_months(date, 12),
    }
}
