//! Insight synthesizer - ranked financial observations
//!
//! A pluggable rule engine that turns the current snapshot (transactions,
//! goals, plan income, selected months) into short classified messages.
//! Instead of waiting for the user to ask the right question, every pass
//! surfaces what is interesting, actionable, or concerning.
//!
//! ## Built-in rules
//!
//! - **Goal Suggestions** - goals worth creating (emergency fund,
//!   retirement, debt reduction, major purchase)
//! - **Goal Health** - deadlines, monthly contributions, milestones
//! - **Savings Rate** - YTD savings vs the 20%-of-income benchmark
//! - **Spending** - top category and unusually large transactions
//! - **Month over Month** - swings between the two selected months
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keel_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&txs, &goals, &cats, income, &months, today);
//! let insights = engine.synthesize(&ctx);
//! ```

pub mod engine;
pub mod goal_health;
pub mod goal_suggestions;
pub mod month_over_month;
pub mod savings_rate;
pub mod spending;
pub mod types;

pub use engine::{AnalysisContext, InsightEngine, InsightRule};
pub use goal_health::GoalHealthRule;
pub use goal_suggestions::GoalSuggestionsRule;
pub use month_over_month::MonthOverMonthRule;
pub use savings_rate::{SavingsRateRule, SAVINGS_BENCHMARK};
pub use spending::SpendingRule;
pub use types::{group_by_kind, Insight, InsightKind};
