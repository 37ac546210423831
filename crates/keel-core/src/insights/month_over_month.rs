//! Month-over-month spending comparison
//!
//! Active only when at least two months are selected: compares total
//! expense spend between the two most-recently-selected months and flags
//! swings of 10% or more. Skipped when the earlier month has no spend to
//! compare against.

use super::engine::{AnalysisContext, InsightRule};
use super::types::Insight;
use crate::models::{Month, Transaction, TransactionType};

pub struct MonthOverMonthRule {
    /// Percent change that counts as a swing
    swing_threshold: f64,
}

impl MonthOverMonthRule {
    pub fn new() -> Self {
        Self {
            swing_threshold: 10.0,
        }
    }

    pub fn with_threshold(swing_threshold: f64) -> Self {
        Self { swing_threshold }
    }
}

impl Default for MonthOverMonthRule {
    fn default() -> Self {
        Self::new()
    }
}

fn expense_total(transactions: &[Transaction], month: Month) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && month.contains(t.date))
        .map(|t| t.magnitude())
        .sum()
}

impl InsightRule for MonthOverMonthRule {
    fn name(&self) -> &'static str {
        "Month over Month"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let [.., previous, current] = ctx.selected_months else {
            return vec![];
        };

        let previous_total = expense_total(ctx.transactions, *previous);
        let current_total = expense_total(ctx.transactions, *current);
        if previous_total <= 0.0 {
            return vec![];
        }

        let change = (current_total - previous_total) / previous_total * 100.0;
        if change.abs() < self.swing_threshold {
            return vec![];
        }

        let insight = if change > 0.0 {
            Insight::warning(format!(
                "Spending rose {:.0}% from {} to {} (${:.0} to ${:.0})",
                change, previous, current, previous_total, current_total
            ))
            .with_action("See what drove the increase")
        } else {
            Insight::success(format!(
                "Spending fell {:.0}% from {} to {} (${:.0} to ${:.0})",
                change.abs(),
                previous,
                current,
                previous_total,
                current_total
            ))
        };

        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::InsightKind;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn expense(id: &str, amount: f64, y: i32, m: u32) -> Transaction {
        Transaction::new(
            id,
            "Stuff",
            amount,
            NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
            "Wants",
            TransactionType::Expense,
        )
    }

    fn run(transactions: &[Transaction], months: &[Month]) -> Vec<Insight> {
        let categories = Category::defaults();
        let ctx = AnalysisContext::new(
            transactions,
            &[],
            &categories,
            0.0,
            months,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        );
        MonthOverMonthRule::new().evaluate(&ctx)
    }

    #[test]
    fn test_needs_two_selected_months() {
        let transactions = vec![expense("t1", -100.0, 2026, 4)];
        assert!(run(&transactions, &[]).is_empty());
        assert!(run(&transactions, &[Month::new(2026, 4)]).is_empty());
    }

    #[test]
    fn test_increase_warns() {
        let transactions = vec![
            expense("t1", -100.0, 2026, 4),
            expense("t2", -150.0, 2026, 5),
        ];
        let months = [Month::new(2026, 4), Month::new(2026, 5)];
        let insights = run(&transactions, &months);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(insights[0].message.contains("rose 50%"));
    }

    #[test]
    fn test_decrease_celebrates() {
        let transactions = vec![
            expense("t1", -200.0, 2026, 4),
            expense("t2", -120.0, 2026, 5),
        ];
        let months = [Month::new(2026, 4), Month::new(2026, 5)];
        let insights = run(&transactions, &months);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert!(insights[0].message.contains("fell 40%"));
    }

    #[test]
    fn test_small_swing_is_quiet() {
        let transactions = vec![
            expense("t1", -100.0, 2026, 4),
            expense("t2", -105.0, 2026, 5),
        ];
        let months = [Month::new(2026, 4), Month::new(2026, 5)];
        assert!(run(&transactions, &months).is_empty());
    }

    #[test]
    fn test_empty_previous_month_is_skipped() {
        let transactions = vec![expense("t1", -100.0, 2026, 5)];
        let months = [Month::new(2026, 4), Month::new(2026, 5)];
        assert!(run(&transactions, &months).is_empty());
    }

    #[test]
    fn test_selection_order_drives_comparison() {
        // Most-recently-selected month last: May selected before April
        let transactions = vec![
            expense("t1", -150.0, 2026, 5),
            expense("t2", -100.0, 2026, 4),
        ];
        let months = [Month::new(2026, 5), Month::new(2026, 4)];
        let insights = run(&transactions, &months);
        // April (100) against May (150): a 33% drop
        assert_eq!(insights[0].kind, InsightKind::Success);
    }
}
