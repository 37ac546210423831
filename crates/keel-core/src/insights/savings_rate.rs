//! Savings rate insight
//!
//! Compares actual savings (the summed `current_amount` of Savings-category
//! goals) against year-to-date income and bands the rate against the fixed
//! 20%-of-income benchmark. Skipped entirely when YTD income is zero.

use chrono::Datelike;

use super::engine::{AnalysisContext, InsightRule};
use super::types::Insight;
use crate::models::TransactionType;

/// The benchmark savings rate, in percent of income
pub const SAVINGS_BENCHMARK: f64 = 20.0;

/// Year-to-date income: actual in-year income transactions when any exist,
/// otherwise `total_income` prorated by months elapsed.
pub(crate) fn year_to_date_income(ctx: &AnalysisContext<'_>) -> f64 {
    let year = ctx.today.year();
    let in_year: f64 = ctx
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Income && t.date.year() == year)
        .filter(|t| t.date <= ctx.today)
        .map(|t| t.amount)
        .sum();

    if in_year > 0.0 {
        in_year
    } else {
        ctx.total_income * ctx.today.month() as f64 / 12.0
    }
}

/// Summed `current_amount` over Savings-category goals
pub(crate) fn actual_savings(ctx: &AnalysisContext<'_>) -> f64 {
    ctx.goals
        .iter()
        .filter(|g| !g.category.is_auto_tracked())
        .map(|g| g.current_amount)
        .sum()
}

/// Savings rate in percent, or None when there is no income to rate against
pub(crate) fn savings_rate(ctx: &AnalysisContext<'_>) -> Option<f64> {
    let income = year_to_date_income(ctx);
    if income <= 0.0 {
        return None;
    }
    Some(actual_savings(ctx) / income * 100.0)
}

pub struct SavingsRateRule;

impl SavingsRateRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SavingsRateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for SavingsRateRule {
    fn name(&self) -> &'static str {
        "Savings Rate"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let Some(rate) = savings_rate(ctx) else {
            return vec![];
        };

        let insight = if rate >= SAVINGS_BENCHMARK {
            Insight::success(format!(
                "You're saving {:.0}% of your income - at or above the {:.0}% benchmark",
                rate, SAVINGS_BENCHMARK
            ))
        } else if rate >= 10.0 {
            Insight::info(format!(
                "You're saving {:.0}% of your income; nudging toward {:.0}% would strengthen your cushion",
                rate, SAVINGS_BENCHMARK
            ))
            .with_action("Raise your monthly savings transfer")
        } else {
            Insight::warning(format!(
                "Your savings rate is {:.0}% of income, well below the {:.0}% benchmark",
                rate, SAVINGS_BENCHMARK
            ))
            .with_action("Review spending to free up savings")
        };

        vec![insight]
    }
}
