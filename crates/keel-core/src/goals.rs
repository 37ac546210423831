//! Goal progress tracking
//!
//! Goals come in two progress modes. Auto-tracked goals (Debt, Investment,
//! Custom) derive `current_amount` from matching transactions on every
//! pass; the recomputation is idempotent and order-independent.
//! Manually-tracked goals (Savings) change only through
//! `set_actual_savings` and are never overwritten by a pass.
//!
//! `sync_progress` is the persistence seam: it diffs recomputed amounts
//! against stored ones and issues a single batched write per pass.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{FinancialGoal, GoalProgress, GoalSchedule, Transaction};
use crate::store::BudgetStore;

/// Matching transactions: same category name as the goal, dated on or
/// before the deadline. Spend magnitude counts toward progress.
fn tracked_amount(goal: &FinancialGoal, transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.category == goal.category.as_str() && t.date <= goal.deadline)
        .map(|t| t.magnitude())
        .sum()
}

/// Recompute `current_amount` for every auto-tracked goal. Pure: returns
/// updated copies, leaves manually-tracked goals untouched.
pub fn recompute_progress(
    goals: &[FinancialGoal],
    transactions: &[Transaction],
) -> Vec<FinancialGoal> {
    goals
        .iter()
        .map(|goal| {
            if !goal.category.is_auto_tracked() {
                return goal.clone();
            }
            let mut updated = goal.clone();
            updated.current_amount = tracked_amount(goal, transactions);
            updated
        })
        .collect()
}

/// The one mutation path for manually-tracked goals
pub fn set_actual_savings(goal: &mut FinancialGoal, amount: f64, now: DateTime<Utc>) {
    goal.current_amount = amount;
    goal.last_updated = Some(now);
}

/// Derived schedule/progress metrics for one goal at a given date
pub fn progress(goal: &FinancialGoal, today: NaiveDate) -> GoalProgress {
    let progress_percent = if goal.target_amount > 0.0 {
        goal.current_amount / goal.target_amount * 100.0
    } else {
        0.0
    };

    let days_until_deadline = (goal.deadline - today).num_days();
    let remaining = goal.target_amount - goal.current_amount;

    let schedule = if remaining <= 0.0 {
        GoalSchedule::Achieved
    } else if days_until_deadline <= 0 {
        GoalSchedule::Overdue
    } else {
        GoalSchedule::Due {
            monthly_required: remaining / (days_until_deadline as f64 / 30.0),
        }
    };

    let on_track = match schedule {
        GoalSchedule::Achieved => true,
        GoalSchedule::Overdue => false,
        GoalSchedule::Due { .. } => {
            let created = goal.created_at.date_naive();
            let span = (goal.deadline - created).num_days();
            if span <= 0 {
                // Degenerate span: judge on progress alone
                progress_percent >= 100.0
            } else {
                let elapsed = (today - created).num_days().clamp(0, span) as f64 / span as f64;
                progress_percent >= elapsed * 100.0
            }
        }
    };

    GoalProgress {
        progress_percent,
        days_until_deadline,
        schedule,
        on_track,
    }
}

/// Recompute all goals against the transaction set and persist whatever
/// changed in one batch. Returns how many goals changed.
pub fn sync_progress(
    store: &dyn BudgetStore,
    user_id: &str,
    goals: &[FinancialGoal],
    transactions: &[Transaction],
) -> Result<usize> {
    let recomputed = recompute_progress(goals, transactions);

    let changed: Vec<FinancialGoal> = recomputed
        .into_iter()
        .zip(goals.iter())
        .filter(|(new, old)| new.current_amount != old.current_amount)
        .map(|(new, _)| new)
        .collect();

    debug!(
        goals = goals.len(),
        changed = changed.len(),
        "Goal progress pass complete"
    );

    if changed.is_empty() {
        return Ok(0);
    }

    store.update_goals_progress(user_id, &changed)?;
    info!(persisted = changed.len(), "Goal progress batch written");
    Ok(changed.len())
}
