//! Command implementations
//!
//! Each command loads the budget snapshot, hands it to the pure engine,
//! and prints the result. All I/O lives here; keel-core never touches a
//! file.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use keel_core::goals::{progress, sync_progress};
use keel_core::insights::{group_by_kind, AnalysisContext, InsightEngine, InsightKind};
use keel_core::models::{
    BudgetPreferences, Category, FinancialGoal, GoalSchedule, Month, Transaction,
};
use keel_core::plan::compute_plan;
use keel_core::store::MemoryStore;
use keel_core::{validate_allocation, Classifier};

/// On-disk budget snapshot. Categories default to the built-in four when
/// the file doesn't list any.
#[derive(Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    #[serde(default)]
    pub preferences: Option<BudgetPreferences>,
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let mut snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    if snapshot.categories.is_empty() {
        snapshot.categories = Category::defaults();
    }
    Ok(snapshot)
}

pub fn load_preferences(snapshot: &Snapshot, config: Option<&Path>) -> Result<BudgetPreferences> {
    if let Some(path) = config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()));
    }
    Ok(snapshot.preferences.clone().unwrap_or_default())
}

/// Snapshot categories with the user's renames/recolors applied
fn effective_categories(snapshot: &Snapshot, preferences: &BudgetPreferences) -> Vec<Category> {
    let mut categories = snapshot.categories.clone();
    for cat in categories.iter_mut() {
        if let Some(style) = preferences.category_customization.get(&cat.id) {
            cat.apply_style(style);
        }
    }
    categories
}

/// Selected months: the `--month` flags in order, or every month present
/// in the snapshot, oldest first.
pub fn resolve_months(snapshot: &Snapshot, selected: &[String]) -> Result<Vec<Month>> {
    if !selected.is_empty() {
        return selected
            .iter()
            .map(|s| Month::from_str(s).map_err(anyhow::Error::msg))
            .collect();
    }
    let months: BTreeSet<Month> = snapshot
        .transactions
        .iter()
        .map(|t| Month::from_date(t.date))
        .collect();
    Ok(months.into_iter().collect())
}

pub fn cmd_plan(snapshot: &Snapshot, config: Option<&Path>) -> Result<()> {
    let preferences = load_preferences(snapshot, config)?;
    let categories = effective_categories(snapshot, &preferences);
    let outcome = compute_plan(&snapshot.transactions, &categories, &preferences);
    let decimals: usize = if preferences.display.show_cents { 2 } else { 0 };

    println!();
    println!("💰 Budget Plan");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Income: ${:.prec$}   Spent: ${:.prec$}",
        outcome.summary.total_income,
        outcome.summary.total_expenses(),
        prec = decimals
    );
    println!();
    println!(
        "   {:<16} {:>12} {:>12} {:>12}",
        "Category", "Planned", "Actual", "Diff"
    );
    for line in &outcome.plan.lines {
        let marker = if line.difference > 0.0 { "▲" } else { " " };
        println!(
            "   {:<16} {:>12.prec$} {:>12.prec$} {:>10.prec$} {}",
            line.category,
            line.recommended,
            line.actual,
            line.difference,
            marker,
            prec = decimals
        );
    }

    if !outcome.suggestions.is_empty() {
        println!();
        for suggestion in &outcome.suggestions {
            println!("   💡 {}", suggestion);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_insights(
    snapshot: &Snapshot,
    config: Option<&Path>,
    months: &[String],
    today: NaiveDate,
) -> Result<()> {
    let preferences = load_preferences(snapshot, config)?;
    let categories = effective_categories(snapshot, &preferences);
    let outcome = compute_plan(&snapshot.transactions, &categories, &preferences);
    let selected = resolve_months(snapshot, months)?;

    let ctx = AnalysisContext::new(
        &snapshot.transactions,
        &snapshot.goals,
        &categories,
        outcome.summary.total_income,
        &selected,
        today,
    );
    let insights = InsightEngine::new().synthesize(&ctx);

    println!();
    if insights.is_empty() {
        println!("   No insights for this window.");
        println!();
        return Ok(());
    }

    for (kind, group) in group_by_kind(&insights) {
        let marker = match kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Success => "✅",
            InsightKind::Info => "ℹ️ ",
        };
        println!("   {} {}", marker, heading(kind));
        for insight in group {
            println!("      • {}", insight.message);
            if let Some(action) = &insight.action {
                println!("        → {}", action);
            }
        }
        println!();
    }
    Ok(())
}

fn heading(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "Needs attention",
        InsightKind::Success => "Going well",
        InsightKind::Info => "Worth knowing",
    }
}

pub fn cmd_goals(snapshot: &Snapshot, today: NaiveDate, sync: bool) -> Result<()> {
    println!();
    println!("🎯 Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    if snapshot.goals.is_empty() {
        println!("   No goals yet.");
        println!();
        return Ok(());
    }

    for goal in &snapshot.goals {
        let metrics = progress(goal, today);
        let mode = if goal.category.is_auto_tracked() {
            "auto"
        } else {
            "manual"
        };
        println!(
            "   {} ({} / {})",
            goal.name,
            goal.category.as_str(),
            mode
        );
        println!(
            "      ${:.0} of ${:.0} ({:.0}%){}",
            goal.current_amount,
            goal.target_amount,
            metrics.progress_percent,
            if metrics.on_track { "" } else { "  off track" }
        );
        match metrics.schedule {
            GoalSchedule::Achieved => println!("      Achieved 🎉"),
            GoalSchedule::Overdue => println!("      Deadline passed ({})", goal.deadline),
            GoalSchedule::Due { monthly_required } => println!(
                "      {} days left, ${:.0}/month to finish",
                metrics.days_until_deadline, monthly_required
            ),
        }
    }

    if sync {
        let store = MemoryStore::new();
        store.seed(
            "local",
            snapshot.transactions.clone(),
            snapshot.categories.clone(),
            snapshot.goals.clone(),
        );
        let changed = sync_progress(&store, "local", &snapshot.goals, &snapshot.transactions)?;
        println!();
        println!("   Progress sync: {} goal(s) updated", changed);
    }
    println!();
    Ok(())
}

pub fn cmd_classify(snapshot: &Snapshot, description: &str, amount: f64) -> Result<()> {
    let classifier = Classifier::new(&snapshot.categories);
    println!("{}", classifier.classify(description, amount));
    Ok(())
}

pub fn cmd_check_allocation(
    snapshot: &Snapshot,
    category: Option<&str>,
    percentage: f64,
) -> Result<()> {
    let editing_id = match category {
        Some(name) => {
            let cat = snapshot
                .categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .with_context(|| format!("No category named \"{}\"", name))?;
            Some(cat.id.clone())
        }
        None => None,
    };

    let check = validate_allocation(&snapshot.categories, editing_id.as_deref(), percentage);
    if check.ok {
        println!("OK: total allocation would be {:.1}%", check.total);
    } else {
        println!(
            "REJECTED: total allocation would be {:.1}% (over 100%)",
            check.total
        );
    }
    Ok(())
}
