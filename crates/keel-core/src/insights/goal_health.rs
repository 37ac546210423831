//! Goal lifecycle insights
//!
//! Per-goal schedule and milestone messages: overdue warnings, deadline
//! countdowns split on 90% progress, a monthly-contribution reminder for
//! auto-tracked goals, and milestone copy per progress band. The
//! automatic-transfer suggestion is suppressed for Savings goals, whose
//! progress the user reports by hand.

use super::engine::{AnalysisContext, InsightRule};
use super::types::Insight;
use crate::goals::progress;
use crate::models::{FinancialGoal, GoalSchedule};

pub struct GoalHealthRule {
    /// Deadline countdown window, in days
    deadline_window: i64,
    /// Progress at which a close deadline reads as good news, in percent
    comfortable_progress: f64,
}

impl GoalHealthRule {
    pub fn new() -> Self {
        Self {
            deadline_window: 30,
            comfortable_progress: 90.0,
        }
    }
}

impl Default for GoalHealthRule {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalHealthRule {
    fn milestone(&self, goal: &FinancialGoal, percent: f64) -> Insight {
        if percent >= 100.0 {
            Insight::success(format!(
                "\"{}\" is complete - you reached ${:.0}",
                goal.name, goal.target_amount
            ))
        } else if percent >= 75.0 {
            Insight::success(format!(
                "\"{}\" is {:.0}% funded - the finish line is in sight",
                goal.name, percent
            ))
        } else if percent >= 50.0 {
            Insight::success(format!(
                "\"{}\" crossed the halfway mark at {:.0}%",
                goal.name, percent
            ))
        } else if percent >= 25.0 {
            Insight::info(format!(
                "\"{}\" is {:.0}% of the way there - keep the contributions coming",
                goal.name, percent
            ))
        } else {
            let insight = Insight::info(format!(
                "\"{}\" is just getting started at {:.0}%",
                goal.name, percent
            ));
            // Savings goals are funded by hand; suggesting an automatic
            // transfer there would fight the manual tracking mode
            if goal.category.is_auto_tracked() {
                insight.with_action("Set up an automatic transfer to build momentum")
            } else {
                insight
            }
        }
    }
}

impl InsightRule for GoalHealthRule {
    fn name(&self) -> &'static str {
        "Goal Health"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for goal in ctx.goals {
            let metrics = progress(goal, ctx.today);

            match metrics.schedule {
                GoalSchedule::Overdue => {
                    insights.push(
                        Insight::warning(format!(
                            "\"{}\" passed its deadline at {:.0}% of the ${:.0} target",
                            goal.name, metrics.progress_percent, goal.target_amount
                        ))
                        .with_action("Extend the deadline or adjust the target"),
                    );
                    // An overdue goal gets no countdown, reminder, or
                    // milestone cheerleading
                    continue;
                }
                GoalSchedule::Due { monthly_required } => {
                    if metrics.days_until_deadline <= self.deadline_window {
                        if metrics.progress_percent >= self.comfortable_progress {
                            insights.push(Insight::success(format!(
                                "\"{}\" is due in {} days and {:.0}% funded - nearly done",
                                goal.name, metrics.days_until_deadline, metrics.progress_percent
                            )));
                        } else {
                            insights.push(
                                Insight::warning(format!(
                                    "\"{}\" is due in {} days but only {:.0}% funded",
                                    goal.name,
                                    metrics.days_until_deadline,
                                    metrics.progress_percent
                                ))
                                .with_action("Review the target or step up contributions"),
                            );
                        }
                    }

                    if goal.category.is_auto_tracked() {
                        insights.push(Insight::info(format!(
                            "Contribute ${:.0}/month to \"{}\" to reach ${:.0} by {}",
                            monthly_required,
                            goal.name,
                            goal.target_amount,
                            goal.deadline.format("%b %e, %Y")
                        )));
                    }
                }
                GoalSchedule::Achieved => {}
            }

            insights.push(self.milestone(goal, metrics.progress_percent));
        }

        insights
    }
}
