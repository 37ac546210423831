//! Smart goal suggestions
//!
//! Proposes goals the user hasn't set up yet: an emergency fund sized from
//! average monthly spend, a retirement contribution, debt reduction when
//! loan-flagged activity exists without a Debt goal, and a major purchase
//! when the savings rate leaves room.

use std::collections::HashMap;

use super::engine::{AnalysisContext, InsightRule};
use super::savings_rate::savings_rate;
use super::types::Insight;
use crate::models::{GoalCategory, Month, TransactionType};

/// Keywords marking a transaction as debt service
const DEBT_KEYWORDS: &[&str] = &["debt", "loan", "credit card payment", "mortgage payment"];

pub struct GoalSuggestionsRule {
    /// Months of spending an emergency fund should cover
    emergency_months: f64,
    /// Share of income to suggest for retirement, in percent
    retirement_share: f64,
    /// Savings rate above which a major purchase looks affordable
    major_purchase_rate: f64,
}

impl GoalSuggestionsRule {
    pub fn new() -> Self {
        Self {
            emergency_months: 6.0,
            retirement_share: 15.0,
            major_purchase_rate: 10.0,
        }
    }
}

impl Default for GoalSuggestionsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalSuggestionsRule {
    /// Average spend per calendar month across the months present in the
    /// transaction set (essentials + wants + savings alike)
    fn average_monthly_spend(&self, ctx: &AnalysisContext<'_>) -> f64 {
        let mut by_month: HashMap<Month, f64> = HashMap::new();
        for tx in ctx.transactions {
            if tx.kind != TransactionType::Expense {
                continue;
            }
            *by_month.entry(Month::from_date(tx.date)).or_insert(0.0) += tx.magnitude();
        }
        if by_month.is_empty() {
            return 0.0;
        }
        by_month.values().sum::<f64>() / by_month.len() as f64
    }

    fn has_goal_named(&self, ctx: &AnalysisContext<'_>, needle: &str) -> bool {
        ctx.goals
            .iter()
            .any(|g| g.name.to_lowercase().contains(needle))
    }

    fn has_debt_activity(&self, ctx: &AnalysisContext<'_>) -> bool {
        ctx.transactions.iter().any(|t| {
            let desc = t.description.to_lowercase();
            let cat = t.category.to_lowercase();
            DEBT_KEYWORDS
                .iter()
                .any(|k| desc.contains(k) || cat.contains(k))
        })
    }
}

impl InsightRule for GoalSuggestionsRule {
    fn name(&self) -> &'static str {
        "Goal Suggestions"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        if !self.has_goal_named(ctx, "emergency") {
            let monthly_spend = self.average_monthly_spend(ctx);
            if monthly_spend > 0.0 {
                let target = monthly_spend * self.emergency_months;
                insights.push(
                    Insight::info(format!(
                        "You don't have an emergency fund yet. {:.0} months of spending would be ${:.0}",
                        self.emergency_months, target
                    ))
                    .with_action(format!("Create an emergency fund goal of ${:.0}", target)),
                );
            }
        }

        if !self.has_goal_named(ctx, "retirement") && ctx.total_income > 0.0 {
            let contribution = ctx.total_income * self.retirement_share / 100.0;
            insights.push(
                Insight::info(format!(
                    "No retirement goal found. Putting {:.0}% of income away would be ${:.0} over this window",
                    self.retirement_share, contribution
                ))
                .with_action("Create a retirement goal"),
            );
        }

        let has_debt_goal = ctx.goals.iter().any(|g| g.category == GoalCategory::Debt);
        if self.has_debt_activity(ctx) && !has_debt_goal {
            insights.push(
                Insight::warning(
                    "You have debt or loan payments but no debt-reduction goal tracking them",
                )
                .with_action("Create a debt-reduction goal"),
            );
        }

        if ctx.goals.len() < 3 {
            if let Some(rate) = savings_rate(ctx) {
                if rate > self.major_purchase_rate {
                    insights.push(
                        Insight::info(format!(
                            "Your {:.0}% savings rate leaves room for a bigger target - a car, a trip, a down payment",
                            rate
                        ))
                        .with_action("Create a major purchase goal"),
                    );
                }
            }
        }

        insights
    }
}
