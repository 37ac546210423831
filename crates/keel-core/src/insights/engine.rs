//! Insight engine - orchestrates the built-in insight rules
//!
//! Rules are pure and synchronous: each one reads the shared context
//! snapshot and returns zero or more insights. A rule whose inputs are
//! missing (no goals, zero income, one selected month) returns an empty
//! list; the engine never fails, it just produces a shorter list.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Category, FinancialGoal, Month, Transaction};

use super::goal_health::GoalHealthRule;
use super::goal_suggestions::GoalSuggestionsRule;
use super::month_over_month::MonthOverMonthRule;
use super::savings_rate::SavingsRateRule;
use super::spending::SpendingRule;
use super::types::{Insight, InsightKind};

/// Explicit input snapshot for one synthesis pass.
///
/// `today` is the injected clock: every deadline countdown and
/// year-to-date window derives from it, never from the wall clock.
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub goals: &'a [FinancialGoal],
    pub categories: &'a [Category],
    /// Income over the active window, as computed by the plan step
    pub total_income: f64,
    /// Selected months in selection order, most recent selection last
    pub selected_months: &'a [Month],
    pub today: NaiveDate,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        goals: &'a [FinancialGoal],
        categories: &'a [Category],
        total_income: f64,
        selected_months: &'a [Month],
        today: NaiveDate,
    ) -> Self {
        Self {
            transactions,
            goals,
            categories,
            total_income,
            selected_months,
            today,
        }
    }
}

/// A single insight rule
pub trait InsightRule: Send + Sync {
    /// Human-readable rule name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against the snapshot
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// The engine that runs every registered rule
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules registered
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(GoalSuggestionsRule::new()));
        engine.register(Box::new(GoalHealthRule::new()));
        engine.register(Box::new(SavingsRateRule::new()));
        engine.register(Box::new(SpendingRule::new()));
        engine.register(Box::new(MonthOverMonthRule::new()));

        engine
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule and rank the combined output: warnings first, then
    /// successes, then infos. The sort is stable, so insights keep their
    /// rule-emission order within a kind.
    pub fn synthesize(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for rule in &self.rules {
            let produced = rule.evaluate(ctx);
            debug!(rule = rule.name(), count = produced.len(), "Rule evaluated");
            insights.extend(produced);
        }

        insights.sort_by_key(|i| std::cmp::Reverse(i.kind.priority()));
        insights
    }

    /// Convenience: only the insights of one kind
    pub fn synthesize_kind(&self, ctx: &AnalysisContext<'_>, kind: InsightKind) -> Vec<Insight> {
        self.synthesize(ctx)
            .into_iter()
            .filter(|i| i.kind == kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_registers_builtin_rules() {
        let engine = InsightEngine::new();
        let names = engine.rule_names();
        assert!(names.contains(&"Goal Suggestions"));
        assert!(names.contains(&"Goal Health"));
        assert!(names.contains(&"Savings Rate"));
        assert!(names.contains(&"Spending"));
        assert!(names.contains(&"Month over Month"));
    }

    #[test]
    fn test_empty_snapshot_produces_no_panic() {
        let engine = InsightEngine::new();
        let categories = Category::defaults();
        let ctx = AnalysisContext::new(
            &[],
            &[],
            &categories,
            0.0,
            &[],
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        );
        // No goals, no income, no months: most rules skip entirely
        let insights = engine.synthesize(&ctx);
        assert!(insights.iter().all(|i| !i.message.is_empty()));
    }

    #[test]
    fn test_output_is_ranked_by_kind() {
        struct Mixed;
        impl InsightRule for Mixed {
            fn name(&self) -> &'static str {
                "Mixed"
            }
            fn evaluate(&self, _ctx: &AnalysisContext<'_>) -> Vec<Insight> {
                vec![
                    Insight::info("third"),
                    Insight::warning("first"),
                    Insight::success("second"),
                ]
            }
        }

        let mut engine = InsightEngine { rules: vec![] };
        engine.register(Box::new(Mixed));

        let categories = Category::defaults();
        let ctx = AnalysisContext::new(
            &[],
            &[],
            &categories,
            0.0,
            &[],
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        );
        let insights = engine.synthesize(&ctx);
        assert_eq!(insights[0].message, "first");
        assert_eq!(insights[1].message, "second");
        assert_eq!(insights[2].message, "third");

        let warnings = engine.synthesize_kind(&ctx, InsightKind::Warning);
        assert_eq!(warnings.len(), 1);
    }
}
