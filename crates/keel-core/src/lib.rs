//! Keel Core Library
//!
//! The budget allocation and financial insight engine behind Keel:
//! - Keyword classifier for mapping transactions onto categories
//! - Allocation validator gating category-percentage edits
//! - Budget plan calculator (ratio or percentage based) with suggestions
//! - Goal progress tracker with batched persistence sync
//! - Insight synthesizer with pluggable rules
//!
//! Every component is a synchronous pure function over in-memory
//! collections; persistence and presentation live behind the interfaces in
//! [`store`]. Functions that reason about time take an explicit date so
//! callers (and tests) control the clock.

pub mod allocation;
pub mod classify;
pub mod error;
pub mod goals;
pub mod insights;
pub mod models;
pub mod plan;
pub mod store;

pub use allocation::{
    allocated_total, ensure_deletable, unallocated, validate_allocation, validate_category_name,
    AllocationCheck,
};
pub use classify::{classify, Classifier, ClassifierRule};
pub use error::{Error, Result};
pub use goals::{progress, recompute_progress, set_actual_savings, sync_progress};
pub use insights::{group_by_kind, AnalysisContext, Insight, InsightEngine, InsightKind, InsightRule};
pub use plan::{compute_plan, compute_plan_with, PlanOptions, PlanOutcome};
pub use store::{BudgetStore, MemoryStore};
