//! Input checks run before allocation.
//!
//! Nothing here clamps or corrects; out-of-range input is rejected with
//! [`Error::InvalidBudgetConfiguration`] and left for the caller to fix.

use crate::{
    errors::{Error, Result},
    models::{Bill, BudgetBuckets, Income},
};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn check_percentage(label: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(Error::invalid_budget(format!(
            "{label} percentage {value} must be between 0 and 100"
        )));
    }
    Ok(())
}

/// Rejects percentages outside 0-100 and a negative carry-forward balance.
///
/// Percentages that do not add up to 100 are accepted.
pub fn validate_buckets(buckets: &BudgetBuckets) -> Result<()> {
    check_percentage("bills", buckets.bills_percentage)?;
    check_percentage("spending", buckets.spending_percentage)?;
    check_percentage("savings", buckets.savings_percentage)?;

    if buckets.bills_bucket_balance < Decimal::ZERO {
        return Err(Error::invalid_budget(format!(
            "bills bucket balance {} cannot be negative",
            buckets.bills_bucket_balance
        )));
    }
    Ok(())
}

/// Rejects a negative paycheck.
pub fn validate_income(income: &Income) -> Result<()> {
    if income.paycheck_amount < Decimal::ZERO {
        return Err(Error::invalid_budget(format!(
            "paycheck amount {} for '{}' cannot be negative",
            income.paycheck_amount, income.name
        )));
    }
    Ok(())
}

/// Rejects a negative amount or a grace period ending before the due date.
pub fn validate_bill(bill: &Bill) -> Result<()> {
    if bill.amount < Decimal::ZERO {
        return Err(Error::invalid_budget(format!(
            "bill '{}' has negative amount {}",
            bill.name, bill.amount
        )));
    }
    if let Some(late_by) = bill.late_by_date {
        if late_by < bill.due_date {
            return Err(Error::invalid_budget(format!(
                "bill '{}' is late by {late_by}, before its due date {}",
                bill.name, bill.due_date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{bill, buckets, income};
    use chrono::NaiveDate;

    #[test]
    fn test_default_buckets_are_valid() {
        assert!(validate_buckets(&BudgetBuckets::default()).is_ok());
    }

    #[test]
    fn test_percentages_not_summing_to_100_are_accepted() {
        assert!(validate_buckets(&buckets(60, 30, 20, 0)).is_ok());
        assert!(validate_buckets(&buckets(0, 0, 0, 0)).is_ok());
    }

    #[test]
    fn test_percentage_out_of_range_is_rejected() {
        let result = validate_buckets(&buckets(101, 0, 0, 0));
        assert!(matches!(
            result,
            Err(Error::InvalidBudgetConfiguration { .. })
        ));

        let result = validate_buckets(&buckets(50, -1, 20, 0));
        assert!(matches!(
            result,
            Err(Error::InvalidBudgetConfiguration { .. })
        ));
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        assert!(validate_buckets(&buckets(50, 30, 20, -5)).is_err());
    }

    #[test]
    fn test_negative_paycheck_is_rejected() {
        let payday = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(validate_income(&income(-1, payday)).is_err());
        assert!(validate_income(&income(0, payday)).is_ok());
    }

    #[test]
    fn test_bill_checks() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut b = bill(1, "Phone", 80, due);
        assert!(validate_bill(&b).is_ok());

        b.late_by_date = Some(due);
        assert!(validate_bill(&b).is_ok());

        b.late_by_date = due.pred_opt();
        assert!(validate_bill(&b).is_err());

        let negative = bill(2, "Refund", -10, due);
        assert!(validate_bill(&negative).is_err());
    }
}
