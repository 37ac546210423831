//! Budget plan calculator
//!
//! Aggregates the caller-filtered transaction window into a summary,
//! resolves the plan basis (ratio buckets vs per-category percentages)
//! once, and produces recommended/actual/difference lines plus overspend
//! suggestions. Zero income short-circuits to all-zero recommendations.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{
    Bucket, BudgetPlan, BudgetPreferences, BudgetSummary, Category, PlanBasis, PlanLine,
    Transaction, TransactionType,
};

/// Tunable suggestion thresholds.
///
/// `overspend_trigger` is the fraction of the recommended amount by which
/// actual spending must exceed it before a suggestion is emitted (0.10 =
/// 10% over). `overspend_strong` marks the point where the wording turns
/// urgent. Both are policy constants, not contracts; suggestions are
/// monotonic in the overspend ratio.
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub overspend_trigger: f64,
    pub overspend_strong: f64,
}

impl PlanOptions {
    pub fn new() -> Self {
        Self {
            overspend_trigger: 0.10,
            overspend_strong: 0.25,
        }
    }

    pub fn with_overspend_trigger(mut self, trigger: f64) -> Self {
        self.overspend_trigger = trigger;
        self
    }
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the plan step produces in one pass
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub summary: BudgetSummary,
    pub plan: BudgetPlan,
    pub suggestions: Vec<String>,
}

impl PlanBasis {
    /// Resolve the basis once: any committed percentage on a non-income
    /// category switches the whole plan to percentage mode.
    pub fn resolve(categories: &[Category], preferences: &BudgetPreferences) -> PlanBasis {
        let percentages: Vec<(String, f64)> = categories
            .iter()
            .filter(|c| !c.is_income)
            .filter_map(|c| c.percentage.map(|p| (c.name.clone(), p)))
            .collect();

        if percentages.is_empty() {
            PlanBasis::Ratios(preferences.ratios)
        } else {
            PlanBasis::Percentages(percentages)
        }
    }
}

/// Compute the recommended plan for the given transaction window
pub fn compute_plan(
    transactions: &[Transaction],
    categories: &[Category],
    preferences: &BudgetPreferences,
) -> PlanOutcome {
    compute_plan_with(transactions, categories, preferences, PlanOptions::new())
}

pub fn compute_plan_with(
    transactions: &[Transaction],
    categories: &[Category],
    preferences: &BudgetPreferences,
    options: PlanOptions,
) -> PlanOutcome {
    let basis = PlanBasis::resolve(categories, preferences);
    let income_category = categories
        .iter()
        .find(|c| c.is_income)
        .map(|c| c.name.as_str())
        .unwrap_or("Income");

    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Income || t.category == income_category)
        .map(|t| t.amount)
        .sum();

    let actuals = actual_totals(transactions, income_category, &basis);
    let summary = BudgetSummary {
        total_income,
        categories: actuals.clone(),
    };

    let targets: Vec<(String, f64)> = match &basis {
        PlanBasis::Ratios(ratios) => Bucket::ALL
            .iter()
            .map(|b| (b.as_str().to_string(), ratios.get(*b)))
            .collect(),
        PlanBasis::Percentages(percentages) => percentages.clone(),
    };

    let mut lines = Vec::with_capacity(targets.len());
    for (category, pct) in &targets {
        let recommended = if total_income > 0.0 {
            total_income * pct / 100.0
        } else {
            0.0
        };
        let actual = actuals.get(category).copied().unwrap_or(0.0);
        lines.push(PlanLine {
            category: category.clone(),
            recommended,
            actual,
            difference: actual - recommended,
        });
    }

    let suggestions = if total_income > 0.0 {
        suggest(&lines, options)
    } else {
        Vec::new()
    };

    debug!(
        basis = ?basis.kind(),
        income = total_income,
        lines = lines.len(),
        suggestions = suggestions.len(),
        "Plan computed"
    );

    PlanOutcome {
        summary,
        plan: BudgetPlan {
            basis: basis.kind(),
            lines,
        },
        suggestions,
    }
}

/// Expense totals keyed by bucket (ratio basis) or category name
/// (percentage basis)
fn actual_totals(
    transactions: &[Transaction],
    income_category: &str,
    basis: &PlanBasis,
) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for tx in transactions {
        if tx.kind != TransactionType::Expense || tx.category == income_category {
            continue;
        }
        let key = match basis {
            PlanBasis::Ratios(_) => Bucket::from_category_name(&tx.category)
                .as_str()
                .to_string(),
            PlanBasis::Percentages(_) => tx.category.clone(),
        };
        *totals.entry(key).or_insert(0.0) += tx.magnitude();
    }
    totals
}

fn suggest(lines: &[PlanLine], options: PlanOptions) -> Vec<String> {
    let mut suggestions = Vec::new();
    for line in lines {
        if line.recommended <= 0.0 {
            continue;
        }
        let over = (line.actual - line.recommended) / line.recommended;
        if over > options.overspend_strong {
            suggestions.push(format!(
                "{} spending is {:.0}% over plan (${:.0} vs ${:.0}) - cut back to stay on budget",
                line.category,
                over * 100.0,
                line.actual,
                line.recommended
            ));
        } else if over > options.overspend_trigger {
            suggestions.push(format!(
                "Consider reducing {} spending: ${:.0} against a planned ${:.0}",
                line.category, line.actual, line.recommended
            ));
        }
    }
    suggestions
}
