use chrono::{Datelike, NaiveDate};

use crate::decimal::Money;
use crate::wallet::{PaymentPlan, Wallet};

/// render a completed plan as a plain-text summary
///
/// Three fixed-width tables: amounts owed per loan per month, amounts paid
/// with a running total, and monthly interest with a running total. Month
/// rows are numbered from 1, or labeled with calendar months when the
/// wallet's config sets `first_month`. File output stays with the caller.
pub fn render_plan(wallet: &Wallet, plan: &PaymentPlan) -> String {
    let names: Vec<&str> = plan
        .loan_ids
        .iter()
        .map(|id| wallet.loan(id).map(|loan| loan.name()).unwrap_or(id.as_str()))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Repayment Plan: {} Approach\n", plan.strategy.label()));
    out.push('\n');

    render_owed_table(&mut out, wallet, plan, &names);
    out.push('\n');
    render_paid_table(&mut out, wallet, plan, &names);
    out.push('\n');
    render_interest_table(&mut out, wallet, plan);

    out
}

fn render_owed_table(out: &mut String, wallet: &Wallet, plan: &PaymentPlan, names: &[&str]) {
    out.push_str(&text_cell("Month"));
    for name in names {
        out.push_str(&text_cell(&format!("{name} [Owed]")));
    }
    out.push_str(&text_cell("Total Owed"));
    out.push('\n');

    for month in 0..plan.months as usize {
        out.push_str(&month_cell(wallet, month));
        for id in &plan.loan_ids {
            let owed = plan.balance_history(id).map_or(Money::ZERO, |s| s[month]);
            out.push_str(&money_cell(owed));
        }
        out.push_str(&money_cell(plan.total_owed_in_month(month)));
        out.push('\n');
    }
}

fn render_paid_table(out: &mut String, wallet: &Wallet, plan: &PaymentPlan, names: &[&str]) {
    out.push_str(&text_cell("Month"));
    for name in names {
        out.push_str(&text_cell(&format!("{name} [Paid]")));
    }
    out.push_str(&text_cell("Total Paid"));
    out.push('\n');

    let mut running_total = Money::ZERO;
    for month in 0..plan.months as usize {
        out.push_str(&month_cell(wallet, month));
        for id in &plan.loan_ids {
            let paid = plan.payment_history(id).map_or(Money::ZERO, |s| s[month]);
            out.push_str(&money_cell(paid));
        }
        running_total += plan.total_paid_in_month(month);
        out.push_str(&money_cell(running_total));
        out.push('\n');
    }
}

fn render_interest_table(out: &mut String, wallet: &Wallet, plan: &PaymentPlan) {
    out.push_str(&text_cell("Month"));
    out.push_str(&text_cell("Interest Earned"));
    out.push_str(&text_cell("Total Interest"));
    out.push('\n');

    let mut running_total = Money::ZERO;
    for month in 0..plan.months as usize {
        let monthly: Money = plan
            .interest_history
            .values()
            .filter_map(|series| series.get(month))
            .copied()
            .sum();
        running_total += monthly;

        out.push_str(&month_cell(wallet, month));
        out.push_str(&money_cell(monthly));
        out.push_str(&money_cell(running_total));
        out.push('\n');
    }
}

fn month_cell(wallet: &Wallet, month: usize) -> String {
    match wallet.config().first_month {
        Some(first) => {
            let date = add_months(first, month as u32);
            text_cell(&format!("{}-{:02}", date.year(), date.month()))
        }
        None => text_cell(&(month + 1).to_string()),
    }
}

fn money_cell(value: Money) -> String {
    format!("{:>16}", format!("{:.2}", value.round_dp(2).as_decimal()))
}

fn text_cell(value: &str) -> String {
    format!("{value:>16}")
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() + months;
    let year = date.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
