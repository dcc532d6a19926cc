//! Domain records consumed by the allocator.
//!
//! These are plain values, independent of the database. The store layer in
//! [`crate::core`] converts SeaORM models into these types, rounding stored
//! `f64` money columns to cents on the way in.

use crate::{
    entities::{bill, income, one_time_deposit},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How often a paycheck arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    /// Every 7 days
    Weekly,
    /// Every 14 days
    Biweekly,
    /// Every 15 days
    Semimonthly,
    /// Same day each calendar month
    Monthly,
    /// No fixed schedule
    Irregular,
}

impl PayFrequency {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Semimonthly => "semimonthly",
            Self::Monthly => "monthly",
            Self::Irregular => "irregular",
        }
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "semimonthly" | "semi-monthly" | "semi_monthly" => Ok(Self::Semimonthly),
            "monthly" => Ok(Self::Monthly),
            "irregular" => Ok(Self::Irregular),
            other => Err(Error::InvalidFrequency {
                value: other.to_string(),
            }),
        }
    }
}

/// How often a bill recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    /// Every 7 days
    Weekly,
    /// Every 14 days
    Biweekly,
    /// Every calendar month
    Monthly,
    /// Every three calendar months
    Quarterly,
    /// Every twelve calendar months
    Annually,
}

impl BillFrequency {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annually => "annually",
        }
    }
}

impl fmt::Display for BillFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annually" | "yearly" => Ok(Self::Annually),
            other => Err(Error::InvalidFrequency {
                value: other.to_string(),
            }),
        }
    }
}

/// An income stream. Only the primary one drives the payday cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    /// Store key
    pub id: i64,
    /// Display name (e.g. employer)
    pub name: String,
    /// Expected amount of each paycheck
    pub paycheck_amount: Decimal,
    /// Pay schedule
    pub pay_frequency: PayFrequency,
    /// Date of the next paycheck, if known
    pub next_payday: Option<NaiveDate>,
    /// Whether this income drives the payday cycle
    pub is_primary: bool,
}

/// A bill to be paid out of the bills bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Store key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Amount due
    pub amount: Decimal,
    /// Date the bill is due
    pub due_date: NaiveDate,
    /// End of the grace period, if the biller allows one
    pub late_by_date: Option<NaiveDate>,
    /// Whether the biller pulls the money automatically
    pub is_autopay: bool,
    /// Total set aside for this bill across all completed paydays
    pub allocated_amount: Decimal,
    /// Last payday on which this bill was paid
    pub last_paid_date: Option<NaiveDate>,
    /// Last payday on which an allocation was recorded
    pub last_allocated_date: Option<NaiveDate>,
    /// Recurrence; `None` for one-time bills
    pub frequency: Option<BillFrequency>,
    /// Free-form grouping (housing, utilities, ...)
    pub category: String,
}

impl Bill {
    /// The grace deadline, falling back to the due date when none is set.
    #[must_use]
    pub fn effective_late_by(&self) -> NaiveDate {
        self.late_by_date.unwrap_or(self.due_date)
    }

    /// A one-time bill that has already been paid. Recurring bills never settle;
    /// completion moves them to their next due date instead.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.frequency.is_none() && self.last_paid_date.is_some()
    }
}

/// Bucket percentages plus the bills balance carried from the last payday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBuckets {
    /// Share of each paycheck for bills, 0-100
    pub bills_percentage: Decimal,
    /// Share of each paycheck for spending, 0-100
    pub spending_percentage: Decimal,
    /// Share of each paycheck for savings, 0-100
    pub savings_percentage: Decimal,
    /// Bills bucket remainder carried forward from the previous cycle
    pub bills_bucket_balance: Decimal,
}

impl BudgetBuckets {
    /// Sum of the three percentages. Anything other than 100 is allowed but worth a warning.
    #[must_use]
    pub fn percentage_total(&self) -> Decimal {
        self.bills_percentage + self.spending_percentage + self.savings_percentage
    }
}

impl Default for BudgetBuckets {
    fn default() -> Self {
        Self {
            bills_percentage: Decimal::from(50),
            spending_percentage: Decimal::from(30),
            savings_percentage: Decimal::from(20),
            bills_bucket_balance: Decimal::ZERO,
        }
    }
}

/// Money expected once, outside the pay schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeDeposit {
    /// Store key
    pub id: i64,
    /// What the money is
    pub name: String,
    /// Expected amount
    pub amount: Decimal,
    /// When it should arrive
    pub expected_date: NaiveDate,
    /// Whether it has arrived
    pub received: bool,
}

/// Converts a stored `f64` into a cent-rounded decimal.
pub fn money_from_f64(value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|e| Error::invalid_budget(format!("{value} is not a representable amount: {e}")))
}

/// Converts a decimal back into the `f64` the store columns use.
pub fn money_to_f64(value: Decimal) -> Result<f64> {
    f64::try_from(value).map_err(|_| Error::InvalidAmount { amount: value })
}

impl TryFrom<income::Model> for Income {
    type Error = Error;

    fn try_from(model: income::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            name: model.name,
            paycheck_amount: money_from_f64(model.paycheck_amount)?,
            pay_frequency: model.pay_frequency.parse()?,
            next_payday: model.next_payday,
            is_primary: model.is_primary,
        })
    }
}

impl TryFrom<bill::Model> for Bill {
    type Error = Error;

    fn try_from(model: bill::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            name: model.name,
            amount: money_from_f64(model.amount)?,
            due_date: model.due_date,
            late_by_date: model.late_by_date,
            is_autopay: model.is_autopay,
            allocated_amount: money_from_f64(model.allocated_amount)?,
            last_paid_date: model.last_paid_date,
            last_allocated_date: model.last_allocated_date,
            frequency: model
                .frequency
                .as_deref()
                .map(str::parse)
                .transpose()?,
            category: model.category,
        })
    }
}

impl TryFrom<one_time_deposit::Model> for OneTimeDeposit {
    type Error = Error;

    fn try_from(model: one_time_deposit::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            name: model.name,
            amount: money_from_f64(model.amount)?,
            expected_date: model.expected_date,
            received: model.received,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_pay_frequency_parse() {
        assert_eq!("weekly".parse::<PayFrequency>().unwrap(), PayFrequency::Weekly);
        assert_eq!(
            "Semi-Monthly".parse::<PayFrequency>().unwrap(),
            PayFrequency::Semimonthly
        );
        assert!(matches!(
            "fortnightly".parse::<PayFrequency>(),
            Err(Error::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_bill_frequency_round_trips_through_str() {
        for freq in [
            BillFrequency::Weekly,
            BillFrequency::Biweekly,
            BillFrequency::Monthly,
            BillFrequency::Quarterly,
            BillFrequency::Annually,
        ] {
            assert_eq!(freq.as_str().parse::<BillFrequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_effective_late_by_defaults_to_due_date() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut bill = crate::test_utils::bill(1, "Rent", 1200, due);
        assert_eq!(bill.effective_late_by(), due);

        let grace = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        bill.late_by_date = Some(grace);
        assert_eq!(bill.effective_late_by(), grace);
    }

    #[test]
    fn test_money_from_f64_rounds_to_cents() {
        assert_eq!(money_from_f64(12.345_6).unwrap(), Decimal::new(1235, 2));
        assert_eq!(money_from_f64(0.1).unwrap(), Decimal::new(10, 2));
        assert!(money_from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_default_buckets_are_50_30_20() {
        let buckets = BudgetBuckets::default();
        assert_eq!(buckets.percentage_total(), Decimal::from(100));
        assert_eq!(buckets.bills_bucket_balance, Decimal::ZERO);
    }
}
