//! Domain models for Keel

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or draws from the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Positive = income-like, negative = spend
    pub amount: f64,
    pub date: NaiveDate,
    /// Soft reference to a category by name
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            date,
            category: category.into(),
            kind,
        }
    }

    /// Spend magnitude, regardless of how the amount was signed on entry
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }
}

/// A budget category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Unique within a budget, case-insensitively
    pub name: String,
    pub color: String,
    pub icon: String,
    /// Built-in categories can be renamed/recolored but never deleted
    pub is_default: bool,
    pub is_income: bool,
    /// Share of income assigned to this category, when the budget is
    /// percentage-based rather than ratio-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Category {
    /// The four built-in categories every budget starts with
    pub fn defaults() -> Vec<Category> {
        vec![
            Category {
                id: "essentials".to_string(),
                name: "Essentials".to_string(),
                color: "#1976d2".to_string(),
                icon: "home".to_string(),
                is_default: true,
                is_income: false,
                percentage: None,
            },
            Category {
                id: "wants".to_string(),
                name: "Wants".to_string(),
                color: "#9c27b0".to_string(),
                icon: "shopping_bag".to_string(),
                is_default: true,
                is_income: false,
                percentage: None,
            },
            Category {
                id: "savings".to_string(),
                name: "Savings".to_string(),
                color: "#2e7d32".to_string(),
                icon: "savings".to_string(),
                is_default: true,
                is_income: false,
                percentage: None,
            },
            Category {
                id: "income".to_string(),
                name: "Income".to_string(),
                color: "#f9a825".to_string(),
                icon: "payments".to_string(),
                is_default: true,
                is_income: true,
                percentage: None,
            },
        ]
    }

    /// Apply a user customization (rename/recolor) without touching the
    /// default/income flags
    pub fn apply_style(&mut self, style: &CategoryStyle) {
        if !style.name.trim().is_empty() {
            self.name = style.name.clone();
        }
        self.color = style.color.clone();
        self.icon = style.icon.clone();
    }
}

/// The three canonical buckets tracked by a ratio-based plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Essentials,
    Wants,
    Savings,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Essentials, Bucket::Wants, Bucket::Savings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essentials => "Essentials",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }

    /// Map a category name onto a bucket. Names that are not a canonical
    /// bucket fold into Essentials, matching the classifier's fallback, so
    /// unknown spending lands in the same place everywhere.
    pub fn from_category_name(name: &str) -> Bucket {
        match name.to_lowercase().as_str() {
            "wants" => Bucket::Wants,
            "savings" => Bucket::Savings,
            _ => Bucket::Essentials,
        }
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "essentials" => Ok(Self::Essentials),
            "wants" => Ok(Self::Wants),
            "savings" => Ok(Self::Savings),
            _ => Err(format!("Unknown bucket: {}", s)),
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target income shares for the three canonical buckets.
///
/// The shares conceptually sum to 100 but sums other than 100 are used as
/// given; the plan calculator never rejects or normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub essentials: f64,
    pub wants: f64,
    pub savings: f64,
}

impl Ratios {
    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Essentials => self.essentials,
            Bucket::Wants => self.wants,
            Bucket::Savings => self.savings,
        }
    }
}

impl Default for Ratios {
    /// The 50/30/20 rule
    fn default() -> Self {
        Self {
            essentials: 50.0,
            wants: 30.0,
            savings: 20.0,
        }
    }
}

/// User-supplied look of a category (rename/recolor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Preferred chart for the dashboard breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
    Bar,
    Donut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPreferences {
    pub kind: ChartKind,
    pub show_legend: bool,
}

impl Default for ChartPreferences {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            show_legend: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub show_cents: bool,
    /// How many recent months the dashboard selects by default
    pub month_count: u32,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_cents: true,
            month_count: 1,
        }
    }
}

/// Per-user budget settings that drive the plan calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetPreferences {
    #[serde(default)]
    pub ratios: Ratios,
    /// Keyed by category id
    #[serde(default)]
    pub category_customization: HashMap<String, CategoryStyle>,
    #[serde(default)]
    pub chart: ChartPreferences,
    #[serde(default)]
    pub display: DisplayPreferences,
}

/// Aggregated actuals for the active window. Derived, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: f64,
    /// Expense totals by category (or bucket) name, deterministic order
    pub categories: BTreeMap<String, f64>,
}

impl BudgetSummary {
    pub fn total_expenses(&self) -> f64 {
        self.categories.values().sum()
    }
}

/// How the plan's target shares were resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanBasis {
    /// The three canonical buckets, shares from `BudgetPreferences.ratios`
    Ratios(Ratios),
    /// Per-category shares taken from `Category.percentage`
    Percentages(Vec<(String, f64)>),
}

impl PlanBasis {
    pub fn kind(&self) -> PlanBasisKind {
        match self {
            Self::Ratios(_) => PlanBasisKind::Ratios,
            Self::Percentages(_) => PlanBasisKind::Percentages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanBasisKind {
    Ratios,
    Percentages,
}

/// One row of the recommended plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLine {
    pub category: String,
    pub recommended: f64,
    pub actual: f64,
    /// actual - recommended; positive means overspend
    pub difference: f64,
}

/// Recommended vs actual spending. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub basis: PlanBasisKind,
    pub lines: Vec<PlanLine>,
}

impl BudgetPlan {
    pub fn line(&self, category: &str) -> Option<&PlanLine> {
        self.lines
            .iter()
            .find(|l| l.category.eq_ignore_ascii_case(category))
    }
}

/// What a financial goal is saving toward.
///
/// Savings goals are manually tracked: the user reports their actual
/// savings and the tracker never overwrites the figure. Every other
/// category is auto-tracked from matching transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Savings,
    Debt,
    Investment,
    Custom,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Debt => "Debt",
            Self::Investment => "Investment",
            Self::Custom => "Custom",
        }
    }

    pub fn is_auto_tracked(&self) -> bool {
        !matches!(self, Self::Savings)
    }
}

impl std::str::FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "savings" => Ok(Self::Savings),
            "debt" => Ok(Self::Debt),
            "investment" => Ok(Self::Investment),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown goal category: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined financial goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Where a goal stands against its deadline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum GoalSchedule {
    /// Target already reached
    Achieved,
    /// Deadline passed with the target unmet; no monthly figure is given
    Overdue,
    /// Still running: contribute this much per month to land on time
    Due { monthly_required: f64 },
}

/// Derived progress metrics for one goal at a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub progress_percent: f64,
    pub days_until_deadline: i64,
    pub schedule: GoalSchedule,
    /// Progress fraction is at least the elapsed fraction of the goal's
    /// created-to-deadline span
    pub on_track: bool,
}

/// A calendar month, used for the selected-month window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for Month {
    type Err = String;

    /// Parses "YYYY-MM"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month (expected YYYY-MM): {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid month (expected YYYY-MM): {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month (expected YYYY-MM): {}", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month out of range: {}", s));
        }
        Ok(Self { year, month })
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_round_trip() {
        assert_eq!(TransactionType::Income.as_str(), "income");
        assert_eq!(
            TransactionType::from_str("Expense").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_default_categories() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 4);
        assert!(defaults.iter().all(|c| c.is_default));
        assert_eq!(defaults.iter().filter(|c| c.is_income).count(), 1);
    }

    #[test]
    fn test_apply_style_keeps_flags() {
        let mut category = Category::defaults().remove(0);
        category.apply_style(&CategoryStyle {
            name: "Needs".to_string(),
            color: "#000000".to_string(),
            icon: "bolt".to_string(),
        });
        assert_eq!(category.name, "Needs");
        assert!(category.is_default);

        // Blank rename is ignored, recolor still applies
        category.apply_style(&CategoryStyle {
            name: "  ".to_string(),
            color: "#ffffff".to_string(),
            icon: "bolt".to_string(),
        });
        assert_eq!(category.name, "Needs");
        assert_eq!(category.color, "#ffffff");
    }

    #[test]
    fn test_bucket_folding() {
        assert_eq!(Bucket::from_category_name("Wants"), Bucket::Wants);
        assert_eq!(Bucket::from_category_name("savings"), Bucket::Savings);
        // Unknown categories land in Essentials
        assert_eq!(Bucket::from_category_name("Pets"), Bucket::Essentials);
    }

    #[test]
    fn test_default_ratios_are_50_30_20() {
        let ratios = Ratios::default();
        assert_eq!(ratios.essentials, 50.0);
        assert_eq!(ratios.wants, 30.0);
        assert_eq!(ratios.savings, 20.0);
    }

    #[test]
    fn test_goal_category_tracking_mode() {
        assert!(!GoalCategory::Savings.is_auto_tracked());
        assert!(GoalCategory::Debt.is_auto_tracked());
        assert!(GoalCategory::Investment.is_auto_tracked());
        assert!(GoalCategory::Custom.is_auto_tracked());
    }

    #[test]
    fn test_month_parse_and_contains() {
        let month = Month::from_str("2026-03").unwrap();
        assert_eq!(month.to_string(), "2026-03");
        assert!(month.contains(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(Month::from_str("2026-13").is_err());
        assert!(Month::from_str("march").is_err());
    }

    #[test]
    fn test_transaction_serde_uses_type_key() {
        let tx = Transaction::new(
            "t1",
            "Coffee",
            -4.50,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            "Wants",
            TransactionType::Expense,
        );
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, TransactionType::Expense);
    }
}
