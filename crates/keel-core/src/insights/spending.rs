//! Top-category and outlier insights
//!
//! Identifies where the money actually goes: the highest-spending category
//! (flagged when it swallows more than 30% of income) and unusually large
//! expense transactions (more than twice the mean expense).

use std::collections::BTreeMap;

use super::engine::{AnalysisContext, InsightRule};
use super::types::Insight;
use crate::models::{Transaction, TransactionType};

pub struct SpendingRule {
    /// Share of income above which the top category is flagged, in percent
    top_category_share: f64,
    /// Multiple of the mean expense that marks a transaction as unusual
    outlier_multiplier: f64,
}

impl SpendingRule {
    pub fn new() -> Self {
        Self {
            top_category_share: 30.0,
            outlier_multiplier: 2.0,
        }
    }

    pub fn with_thresholds(top_category_share: f64, outlier_multiplier: f64) -> Self {
        Self {
            top_category_share,
            outlier_multiplier,
        }
    }
}

impl Default for SpendingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for SpendingRule {
    fn name(&self) -> &'static str {
        "Spending"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        let expenses: Vec<&Transaction> = ctx
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense)
            .collect();
        if expenses.is_empty() {
            return insights;
        }

        // Highest-spending category
        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for tx in &expenses {
            *by_category.entry(tx.category.as_str()).or_insert(0.0) += tx.magnitude();
        }
        if let Some((top_name, top_total)) = by_category
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, total)| (*name, *total))
        {
            if ctx.total_income > 0.0 {
                let share = top_total / ctx.total_income * 100.0;
                if share > self.top_category_share {
                    insights.push(
                        Insight::warning(format!(
                            "{} is your biggest spending category at {:.0}% of income (${:.0})",
                            top_name, share, top_total
                        ))
                        .with_action(format!("Review {} transactions", top_name)),
                    );
                } else {
                    insights.push(Insight::info(format!(
                        "{} is your biggest spending category at ${:.0}",
                        top_name, top_total
                    )));
                }
            } else {
                insights.push(Insight::info(format!(
                    "{} is your biggest spending category at ${:.0}",
                    top_name, top_total
                )));
            }
        }

        // Unusually large transactions
        let mean = expenses.iter().map(|t| t.magnitude()).sum::<f64>() / expenses.len() as f64;
        let threshold = mean * self.outlier_multiplier;
        let mut outliers: Vec<&&Transaction> = expenses
            .iter()
            .filter(|t| t.magnitude() > threshold)
            .collect();
        outliers.sort_by(|a, b| {
            b.magnitude()
                .partial_cmp(&a.magnitude())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(largest) = outliers.first() {
            insights.push(Insight::info(format!(
                "{} unusually large expense{}: the biggest was ${:.0} ({})",
                outliers.len(),
                if outliers.len() == 1 { "" } else { "s" },
                largest.magnitude(),
                largest.description
            )));
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::InsightKind;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn expense(id: &str, desc: &str, amount: f64, category: &str) -> Transaction {
        Transaction::new(id, desc, amount, date(10), category, TransactionType::Expense)
    }

    fn run(transactions: &[Transaction], total_income: f64) -> Vec<Insight> {
        let categories = Category::defaults();
        let ctx = AnalysisContext::new(
            transactions,
            &[],
            &categories,
            total_income,
            &[],
            date(31),
        );
        SpendingRule::new().evaluate(&ctx)
    }

    #[test]
    fn test_top_category_over_threshold_warns() {
        let transactions = vec![
            expense("t1", "Rent", -1600.0, "Essentials"),
            expense("t2", "Movies", -100.0, "Wants"),
        ];
        let insights = run(&transactions, 4000.0);
        let top = insights
            .iter()
            .find(|i| i.message.contains("biggest spending category"))
            .unwrap();
        // 1600 / 4000 = 40%
        assert_eq!(top.kind, InsightKind::Warning);
        assert!(top.message.contains("Essentials"));
        assert!(top.message.contains("40%"));
    }

    #[test]
    fn test_top_category_under_threshold_is_informational() {
        let transactions = vec![expense("t1", "Rent", -900.0, "Essentials")];
        let insights = run(&transactions, 4000.0);
        let top = insights
            .iter()
            .find(|i| i.message.contains("biggest spending category"))
            .unwrap();
        assert_eq!(top.kind, InsightKind::Info);
    }

    #[test]
    fn test_outliers_above_twice_the_mean() {
        // Mean of (10, 10, 10, 90) = 30; only the 90 clears 2 x 30
        let transactions = vec![
            expense("t1", "Coffee", -10.0, "Wants"),
            expense("t2", "Coffee", -10.0, "Wants"),
            expense("t3", "Coffee", -10.0, "Wants"),
            expense("t4", "New tires", -90.0, "Essentials"),
        ];
        let insights = run(&transactions, 0.0);
        let outlier = insights
            .iter()
            .find(|i| i.message.contains("unusually large"))
            .unwrap();
        assert!(outlier.message.contains("1 unusually large expense"));
        assert!(outlier.message.contains("New tires"));
    }

    #[test]
    fn test_uniform_spending_has_no_outliers() {
        let transactions = vec![
            expense("t1", "Coffee", -10.0, "Wants"),
            expense("t2", "Coffee", -12.0, "Wants"),
            expense("t3", "Coffee", -11.0, "Wants"),
        ];
        let insights = run(&transactions, 0.0);
        assert!(!insights.iter().any(|i| i.message.contains("unusually large")));
    }

    #[test]
    fn test_no_expenses_no_output() {
        let transactions = vec![Transaction::new(
            "t1",
            "Paycheck",
            3000.0,
            date(1),
            "Income",
            TransactionType::Income,
        )];
        assert!(run(&transactions, 3000.0).is_empty());
    }
}
