//! Plain-text summaries of payday plans and history.
//!
//! The functions here only format; they return strings the CLI prints as-is.

use crate::{
    core::{
        allocator::{PaydayCycle, PlanStatus},
        completion::{CompletionOutcome, CompletionSummary},
        history::PaydayRecord,
    },
    models::{Bill, BudgetBuckets, Income, OneTimeDeposit},
};
use rust_decimal::Decimal;

/// Formats a money amount as `$1,234.50`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Formats a money amount from a stored `f64` column.
fn format_stored(amount: f64) -> String {
    Decimal::try_from(amount).map_or_else(|_| format!("${amount:.2}"), format_money)
}

/// Summarises a plan: bucket amounts, bills to pay now, deferred bills, and carry-forward.
///
/// `total_unallocated` is what is still owed across every bill, shown as the
/// amount that stays in the bills account for future bills.
#[must_use]
pub fn format_plan_summary(cycle: &PaydayCycle, total_unallocated: Decimal) -> String {
    if cycle.status == PlanStatus::NoIncomeConfigured {
        return "No payday set. Add an income with a next payday to plan your paycheck.\n"
            .to_string();
    }

    let mut summary = format!(
        "Payday {} - Paycheck {}\n",
        cycle.cycle_end.format("%A, %B %-d, %Y"),
        format_money(cycle.paycheck_amount)
    );
    summary.push_str(&format!(
        "  Bills: {} | Spending: {} | Savings: {}\n",
        format_money(cycle.bills_bucket_amount),
        format_money(cycle.spending_bucket_amount),
        format_money(cycle.savings_bucket_amount)
    ));

    if cycle.bills_paid.is_empty() {
        summary.push_str("\nNo bills due this check!\n");
    } else {
        summary.push_str("\nPay these bills now:\n");
        for bill in &cycle.bills_paid {
            let autopay = if bill.is_autopay { " (auto-pay)" } else { "" };
            summary.push_str(&format!(
                "  {} - {} due {}{autopay}\n",
                bill.name,
                format_money(bill.amount),
                bill.due_date.format("%b %-d")
            ));
        }
    }

    if !cycle.bills_deferred.is_empty() {
        summary.push_str("\nDeferred to a later payday:\n");
        for bill in &cycle.bills_deferred {
            summary.push_str(&format!(
                "  {} - {} late by {}\n",
                bill.name,
                format_money(bill.amount),
                bill.effective_late_by().format("%b %-d")
            ));
        }
    }

    summary.push_str(&format!(
        "\nCarry forward: {} | Next payday: {}\n",
        format_money(cycle.bills_bucket_remainder),
        cycle.next_cycle_end.format("%b %-d, %Y")
    ));
    summary.push_str(&format!(
        "Total unallocated (future bills): {}\n",
        format_money(total_unallocated)
    ));

    summary
}

/// One-line result of a completion attempt.
#[must_use]
pub fn format_completion(outcome: &CompletionOutcome) -> String {
    match outcome {
        CompletionOutcome::Completed(CompletionSummary {
            payday_date,
            bills_recorded,
            bills_skipped,
            next_payday,
            bills_bucket_balance,
            ..
        }) => format!(
            "Payday {payday_date} complete: {bills_recorded} bills recorded ({bills_skipped} already recorded). Next payday {next_payday}, carry forward {}.",
            format_money(*bills_bucket_balance)
        ),
        CompletionOutcome::AlreadyCompleted { payday_date } => {
            format!("Payday {payday_date} was already completed; nothing changed.")
        }
    }
}

/// Lists completed paydays with the bills each one paid.
#[must_use]
pub fn format_history(records: &[PaydayRecord]) -> String {
    if records.is_empty() {
        return "No paydays completed yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let payday = &record.payday;
        out.push_str(&format!(
            "{} - Paycheck {} | Bills {} | Spending {} | Savings {} | Left {}\n",
            payday.payday_date,
            format_stored(payday.paycheck_amount),
            format_stored(payday.bills_amount),
            format_stored(payday.spending_amount),
            format_stored(payday.savings_amount),
            format_stored(payday.bills_unallocated)
        ));
        for line in &record.bills {
            out.push_str(&format!(
                "    {} {} (due {})\n",
                line.bill_name,
                format_stored(line.amount_allocated),
                line.due_date
            ));
        }
    }
    out
}

/// One line per income, marking the primary one.
#[must_use]
pub fn format_incomes(incomes: &[Income]) -> String {
    if incomes.is_empty() {
        return "No incomes yet.\n".to_string();
    }

    let mut out = String::new();
    for income in incomes {
        let payday = income
            .next_payday
            .map_or_else(|| "no payday set".to_string(), |d| format!("next {d}"));
        let primary = if income.is_primary { " [primary]" } else { "" };
        out.push_str(&format!(
            "#{} {} - {} {}, {payday}{primary}\n",
            income.id,
            income.name,
            format_money(income.paycheck_amount),
            income.pay_frequency
        ));
    }
    out
}

/// One line per bill with its schedule and what has been set aside.
#[must_use]
pub fn format_bills(bills: &[Bill]) -> String {
    if bills.is_empty() {
        return "No bills found.\n".to_string();
    }

    let mut out = String::new();
    for bill in bills {
        let mut details = format!("due {}", bill.due_date);
        if let Some(late_by) = bill.late_by_date {
            details.push_str(&format!(", late by {late_by}"));
        }
        details.push_str(&format!(
            ", {}",
            bill.frequency.map_or("one-time", |f| f.as_str())
        ));
        if bill.is_autopay {
            details.push_str(", auto-pay");
        }
        out.push_str(&format!(
            "#{} {} - {} ({details}) [{}] allocated {}\n",
            bill.id,
            bill.name,
            format_money(bill.amount),
            bill.category,
            format_money(bill.allocated_amount)
        ));
    }
    out
}

/// Bucket percentages and carry-forward, flagging a total other than 100%.
#[must_use]
pub fn format_buckets(buckets: &BudgetBuckets) -> String {
    let total = buckets.percentage_total();
    let mut out = format!(
        "Bills {}% | Spending {}% | Savings {}% (total {total}%)\nCarry forward: {}\n",
        buckets.bills_percentage.normalize(),
        buckets.spending_percentage.normalize(),
        buckets.savings_percentage.normalize(),
        format_money(buckets.bills_bucket_balance)
    );
    if total != Decimal::ONE_HUNDRED {
        out.push_str("Warning: percentages should add up to 100%.\n");
    }
    out
}

/// Pending one-time deposits, or an empty string when there are none.
#[must_use]
pub fn format_deposits(deposits: &[OneTimeDeposit]) -> String {
    if deposits.is_empty() {
        return String::new();
    }

    let mut out = "One-time deposits expected:\n".to_string();
    for deposit in deposits {
        out.push_str(&format!(
            "  #{} {} - {} expected {}\n",
            deposit.id,
            deposit.name,
            format_money(deposit.amount),
            deposit.expected_date.format("%b %-d, %Y")
        ));
    }
    out
}
