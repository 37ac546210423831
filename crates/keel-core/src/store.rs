//! Storage collaborator interfaces
//!
//! The engine itself is pure; persistence lives behind `BudgetStore`.
//! Collections are scoped per user (one budget per user here; the
//! user -> budget -> collection hierarchy is the collaborator's concern).
//! `MemoryStore` is the in-memory implementation used by the CLI and
//! tests; it enforces the same validation rules a real backend would.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::allocation::{ensure_deletable, validate_allocation, validate_category_name};
use crate::error::{Error, Result};
use crate::models::{Category, FinancialGoal, Transaction};

pub trait BudgetStore {
    fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    fn add_transaction(&self, user_id: &str, tx: &Transaction) -> Result<()>;
    fn update_transaction(&self, user_id: &str, tx: &Transaction) -> Result<()>;
    fn delete_transaction(&self, user_id: &str, tx_id: &str) -> Result<()>;

    fn load_categories(&self, user_id: &str) -> Result<Vec<Category>>;
    fn add_category(&self, user_id: &str, category: &Category) -> Result<()>;
    fn update_category(&self, user_id: &str, category: &Category) -> Result<()>;
    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;

    fn load_goals(&self, user_id: &str) -> Result<Vec<FinancialGoal>>;
    fn add_goal(&self, user_id: &str, goal: &FinancialGoal) -> Result<()>;
    fn update_goal(&self, user_id: &str, goal: &FinancialGoal) -> Result<()>;
    fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;

    /// Write recomputed goal progress in one batch. Called at most once per
    /// change-detection pass, and only when something actually changed.
    fn update_goals_progress(&self, user_id: &str, goals: &[FinancialGoal]) -> Result<()>;
}

#[derive(Default)]
struct UserData {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    goals: Vec<FinancialGoal>,
}

/// In-memory store for tests and the CLI
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with a full snapshot in one call
    pub fn seed(
        &self,
        user_id: &str,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        goals: Vec<FinancialGoal>,
    ) {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.insert(
            user_id.to_string(),
            UserData {
                transactions,
                categories,
                goals,
            },
        );
    }

    fn with_user<T>(&self, user_id: &str, f: impl FnOnce(&mut UserData) -> Result<T>) -> Result<T> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        f(users.entry(user_id.to_string()).or_default())
    }
}

impl BudgetStore for MemoryStore {
    fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.with_user(user_id, |data| Ok(data.transactions.clone()))
    }

    fn add_transaction(&self, user_id: &str, tx: &Transaction) -> Result<()> {
        self.with_user(user_id, |data| {
            data.transactions.push(tx.clone());
            Ok(())
        })
    }

    fn update_transaction(&self, user_id: &str, tx: &Transaction) -> Result<()> {
        self.with_user(user_id, |data| {
            let slot = data
                .transactions
                .iter_mut()
                .find(|t| t.id == tx.id)
                .ok_or_else(|| Error::NotFound(format!("transaction {}", tx.id)))?;
            *slot = tx.clone();
            Ok(())
        })
    }

    fn delete_transaction(&self, user_id: &str, tx_id: &str) -> Result<()> {
        self.with_user(user_id, |data| {
            let before = data.transactions.len();
            data.transactions.retain(|t| t.id != tx_id);
            if data.transactions.len() == before {
                return Err(Error::NotFound(format!("transaction {}", tx_id)));
            }
            Ok(())
        })
    }

    fn load_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.with_user(user_id, |data| Ok(data.categories.clone()))
    }

    fn add_category(&self, user_id: &str, category: &Category) -> Result<()> {
        self.with_user(user_id, |data| {
            validate_category_name(&category.name, &data.categories, None)?;
            if let Some(pct) = category.percentage {
                let check = validate_allocation(&data.categories, None, pct);
                if !check.ok {
                    return Err(Error::Validation(format!(
                        "Allocation would reach {:.1}% (over 100%)",
                        check.total
                    )));
                }
            }
            data.categories.push(category.clone());
            Ok(())
        })
    }

    fn update_category(&self, user_id: &str, category: &Category) -> Result<()> {
        self.with_user(user_id, |data| {
            if !data.categories.iter().any(|c| c.id == category.id) {
                return Err(Error::NotFound(format!("category {}", category.id)));
            }
            validate_category_name(&category.name, &data.categories, Some(&category.id))?;
            if let Some(pct) = category.percentage {
                let check = validate_allocation(&data.categories, Some(&category.id), pct);
                if !check.ok {
                    return Err(Error::Validation(format!(
                        "Allocation would reach {:.1}% (over 100%)",
                        check.total
                    )));
                }
            }
            if let Some(slot) = data.categories.iter_mut().find(|c| c.id == category.id) {
                *slot = category.clone();
            }
            Ok(())
        })
    }

    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        self.with_user(user_id, |data| {
            let category = data
                .categories
                .iter()
                .find(|c| c.id == category_id)
                .ok_or_else(|| Error::NotFound(format!("category {}", category_id)))?;
            ensure_deletable(category)?;
            data.categories.retain(|c| c.id != category_id);
            Ok(())
        })
    }

    fn load_goals(&self, user_id: &str) -> Result<Vec<FinancialGoal>> {
        self.with_user(user_id, |data| Ok(data.goals.clone()))
    }

    fn add_goal(&self, user_id: &str, goal: &FinancialGoal) -> Result<()> {
        self.with_user(user_id, |data| {
            if goal.name.trim().is_empty() {
                return Err(Error::Validation("Goal name cannot be empty".to_string()));
            }
            if goal.target_amount <= 0.0 {
                return Err(Error::Validation(
                    "Goal target must be positive".to_string(),
                ));
            }
            data.goals.push(goal.clone());
            Ok(())
        })
    }

    fn update_goal(&self, user_id: &str, goal: &FinancialGoal) -> Result<()> {
        self.with_user(user_id, |data| {
            let slot = data
                .goals
                .iter_mut()
                .find(|g| g.id == goal.id)
                .ok_or_else(|| Error::NotFound(format!("goal {}", goal.id)))?;
            *slot = goal.clone();
            Ok(())
        })
    }

    fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.with_user(user_id, |data| {
            let before = data.goals.len();
            data.goals.retain(|g| g.id != goal_id);
            if data.goals.len() == before {
                return Err(Error::NotFound(format!("goal {}", goal_id)));
            }
            Ok(())
        })
    }

    fn update_goals_progress(&self, user_id: &str, goals: &[FinancialGoal]) -> Result<()> {
        self.with_user(user_id, |data| {
            for updated in goals {
                if let Some(slot) = data.goals.iter_mut().find(|g| g.id == updated.id) {
                    *slot = updated.clone();
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalCategory, TransactionType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn goal(id: &str, name: &str) -> FinancialGoal {
        FinancialGoal {
            id: id.to_string(),
            name: name.to_string(),
            target_amount: 1000.0,
            current_amount: 0.0,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            category: GoalCategory::Debt,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            last_updated: None,
        }
    }

    #[test]
    fn test_goal_crud() {
        let store = MemoryStore::new();
        store.add_goal("u1", &goal("g1", "Pay off card")).unwrap();

        let mut loaded = store.load_goals("u1").unwrap();
        assert_eq!(loaded.len(), 1);

        loaded[0].target_amount = 2000.0;
        store.update_goal("u1", &loaded[0]).unwrap();
        assert_eq!(store.load_goals("u1").unwrap()[0].target_amount, 2000.0);

        store.delete_goal("u1", "g1").unwrap();
        assert!(store.load_goals("u1").unwrap().is_empty());
        assert!(matches!(
            store.delete_goal("u1", "g1"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_goal_validation() {
        let store = MemoryStore::new();
        let mut bad = goal("g1", "");
        assert!(store.add_goal("u1", &bad).is_err());
        bad.name = "ok".to_string();
        bad.target_amount = 0.0;
        assert!(store.add_goal("u1", &bad).is_err());
    }

    #[test]
    fn test_category_writes_are_gated() {
        let store = MemoryStore::new();
        for cat in Category::defaults() {
            store.add_category("u1", &cat).unwrap();
        }

        // Duplicate name, case-insensitive
        let mut dup = Category::defaults().remove(0);
        dup.id = "other".to_string();
        dup.name = "ESSENTIALS".to_string();
        assert!(store.add_category("u1", &dup).is_err());

        // Over-allocation
        let mut cats = store.load_categories("u1").unwrap();
        cats[0].percentage = Some(60.0);
        store.update_category("u1", &cats[0]).unwrap();
        cats[1].percentage = Some(41.0);
        assert!(store.update_category("u1", &cats[1]).is_err());
        cats[1].percentage = Some(40.0);
        store.update_category("u1", &cats[1]).unwrap();

        // Default categories cannot be deleted
        assert!(store.delete_category("u1", "essentials").is_err());
    }

    #[test]
    fn test_progress_batch_updates_matching_goals() {
        let store = MemoryStore::new();
        store.add_goal("u1", &goal("g1", "Card")).unwrap();
        store.add_goal("u1", &goal("g2", "Loan")).unwrap();

        let mut g1 = goal("g1", "Card");
        g1.current_amount = 250.0;
        store.update_goals_progress("u1", &[g1]).unwrap();

        let loaded = store.load_goals("u1").unwrap();
        assert_eq!(loaded[0].current_amount, 250.0);
        assert_eq!(loaded[1].current_amount, 0.0);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = MemoryStore::new();
        let tx = Transaction::new(
            "t1",
            "Coffee",
            -4.0,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            "Wants",
            TransactionType::Expense,
        );
        store.add_transaction("u1", &tx).unwrap();
        assert_eq!(store.load_transactions("u1").unwrap().len(), 1);
        assert!(store.load_transactions("u2").unwrap().is_empty());
    }
}
