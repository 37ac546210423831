//! Percentage-allocation validation
//!
//! Gates every category-percentage edit: the sum over non-income categories
//! (with the in-progress edit substituted) must never exceed 100. Exactly
//! 100 is accepted; under-allocation is accepted and only surfaced as an
//! informational figure.

use crate::error::{Error, Result};
use crate::models::Category;

/// Outcome of an allocation check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationCheck {
    pub ok: bool,
    /// The total the edit would commit, in percent
    pub total: f64,
}

/// Validate a candidate percentage for the category being edited.
///
/// `editing_category_id` excludes that category's committed percentage from
/// the sum so the candidate replaces rather than stacks on it. `None` means
/// a brand-new category is being added.
pub fn validate_allocation(
    categories: &[Category],
    editing_category_id: Option<&str>,
    candidate_percentage: f64,
) -> AllocationCheck {
    let committed: f64 = categories
        .iter()
        .filter(|c| !c.is_income)
        .filter(|c| editing_category_id != Some(c.id.as_str()))
        .filter_map(|c| c.percentage)
        .sum();

    let total = committed + candidate_percentage;
    AllocationCheck {
        ok: total <= 100.0,
        total,
    }
}

/// Sum of committed percentages over non-income categories
pub fn allocated_total(categories: &[Category]) -> f64 {
    categories
        .iter()
        .filter(|c| !c.is_income)
        .filter_map(|c| c.percentage)
        .sum()
}

/// Percentage of income not yet assigned to any category
pub fn unallocated(categories: &[Category]) -> f64 {
    (100.0 - allocated_total(categories)).max(0.0)
}

/// Reject empty or duplicate (case-insensitive) category names.
///
/// `existing_id` exempts the category being renamed from its own name.
pub fn validate_category_name(
    name: &str,
    categories: &[Category],
    existing_id: Option<&str>,
) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Category name cannot be empty".to_string()));
    }
    let duplicate = categories
        .iter()
        .filter(|c| existing_id != Some(c.id.as_str()))
        .any(|c| c.name.eq_ignore_ascii_case(trimmed));
    if duplicate {
        return Err(Error::Validation(format!(
            "A category named \"{}\" already exists",
            trimmed
        )));
    }
    Ok(())
}

/// Default categories can be renamed or recolored but never deleted
pub fn ensure_deletable(category: &Category) -> Result<()> {
    if category.is_default {
        return Err(Error::Validation(format!(
            "\"{}\" is a built-in category and cannot be deleted",
            category.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories_with(percentages: &[(&str, Option<f64>)]) -> Vec<Category> {
        let mut categories = Category::defaults();
        for cat in categories.iter_mut() {
            if let Some((_, pct)) = percentages.iter().find(|(name, _)| *name == cat.name) {
                cat.percentage = *pct;
            }
        }
        categories
    }

    #[test]
    fn test_edit_within_budget_is_ok() {
        // Essentials 50, Wants 30; editing Essentials to 60 counts 30 + 60
        let categories = categories_with(&[("Essentials", Some(50.0)), ("Wants", Some(30.0))]);
        let check = validate_allocation(&categories, Some("essentials"), 60.0);
        assert!(check.ok);
        assert_eq!(check.total, 90.0);
    }

    #[test]
    fn test_edit_over_budget_is_rejected() {
        let categories = categories_with(&[("Essentials", Some(50.0)), ("Wants", Some(30.0))]);
        let check = validate_allocation(&categories, Some("essentials"), 71.0);
        assert!(!check.ok);
        assert_eq!(check.total, 101.0);
    }

    #[test]
    fn test_exactly_100_is_ok() {
        let categories = categories_with(&[("Essentials", Some(50.0)), ("Wants", Some(30.0))]);
        let check = validate_allocation(&categories, Some("essentials"), 70.0);
        assert!(check.ok);
        assert_eq!(check.total, 100.0);
    }

    #[test]
    fn test_new_category_stacks_on_committed() {
        let categories = categories_with(&[("Essentials", Some(50.0)), ("Wants", Some(30.0))]);
        assert!(validate_allocation(&categories, None, 20.0).ok);
        assert!(!validate_allocation(&categories, None, 21.0).ok);
    }

    #[test]
    fn test_income_percentage_is_ignored() {
        let mut categories = categories_with(&[("Essentials", Some(50.0))]);
        if let Some(income) = categories.iter_mut().find(|c| c.is_income) {
            income.percentage = Some(90.0);
        }
        let check = validate_allocation(&categories, None, 40.0);
        assert!(check.ok);
        assert_eq!(check.total, 90.0);
    }

    #[test]
    fn test_unallocated() {
        let categories = categories_with(&[("Essentials", Some(50.0)), ("Wants", Some(30.0))]);
        assert_eq!(allocated_total(&categories), 80.0);
        assert_eq!(unallocated(&categories), 20.0);
    }

    #[test]
    fn test_category_name_validation() {
        let categories = Category::defaults();
        assert!(validate_category_name("Pets", &categories, None).is_ok());
        assert!(validate_category_name("", &categories, None).is_err());
        assert!(validate_category_name("   ", &categories, None).is_err());
        assert!(validate_category_name("wants", &categories, None).is_err());
        // Renaming a category to its own name is allowed
        assert!(validate_category_name("Wants", &categories, Some("wants")).is_ok());
    }

    #[test]
    fn test_default_categories_cannot_be_deleted() {
        let categories = Category::defaults();
        assert!(ensure_deletable(&categories[0]).is_err());

        let custom = Category {
            id: "pets".to_string(),
            name: "Pets".to_string(),
            color: "#795548".to_string(),
            icon: "pets".to_string(),
            is_default: false,
            is_income: false,
            percentage: None,
        };
        assert!(ensure_deletable(&custom).is_ok());
    }
}
