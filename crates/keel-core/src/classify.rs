//! Keyword classifier for transaction descriptions
//!
//! Maps a free-text description and signed amount onto a category name.
//! Income (positive amount) short-circuits to the income category; expense
//! descriptions are matched against an ordered rule list compiled from the
//! category slice. The order of that slice IS the priority list: the first
//! matching category wins, user-defined rules outrank the keyword table,
//! and anything unmatched falls back to the essentials-equivalent default.

use regex::Regex;
use tracing::warn;

use crate::models::Category;

/// Keyword table for the built-in categories. User-defined categories get
/// their own lower-cased name as the implicit keyword.
const ESSENTIALS_KEYWORDS: &[&str] = &[
    "rent", "mortgage", "grocery", "groceries", "supermarket", "utility", "utilities", "electric",
    "water", "gas", "internet", "phone", "insurance", "pharmacy", "medical", "doctor", "dentist",
    "transit", "fuel", "commute", "childcare", "tuition",
];

const WANTS_KEYWORDS: &[&str] = &[
    "restaurant",
    "dining",
    "coffee",
    "cafe",
    "bar",
    "takeout",
    "delivery",
    "entertainment",
    "movie",
    "cinema",
    "concert",
    "netflix",
    "spotify",
    "hulu",
    "gaming",
    "shopping",
    "clothing",
    "travel",
    "hotel",
    "vacation",
    "gym",
    "hobby",
    "subscription",
];

const SAVINGS_KEYWORDS: &[&str] = &[
    "saving",
    "savings",
    "transfer to savings",
    "investment",
    "invest",
    "brokerage",
    "deposit",
    "401k",
    "roth",
    "ira",
    "retirement",
];

/// A user-defined classification rule, checked before the keyword table
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub pattern: String,
    pub is_regex: bool,
    /// Category name the rule assigns
    pub category: String,
}

struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    category: String,
}

struct KeywordEntry {
    category: String,
    keywords: Vec<String>,
}

/// Compiled classifier over an explicit category priority list
pub struct Classifier {
    rules: Vec<CompiledRule>,
    entries: Vec<KeywordEntry>,
    income_category: String,
    fallback: String,
}

impl Classifier {
    /// Compile a classifier from categories in priority order
    pub fn new(categories: &[Category]) -> Self {
        Self::with_rules(categories, &[])
    }

    /// Compile with user-defined rules, which outrank the keyword table.
    /// Rules with invalid regex patterns are skipped.
    pub fn with_rules(categories: &[Category], rules: &[ClassifierRule]) -> Self {
        let compiled = rules
            .iter()
            .filter_map(|r| {
                let regex = if r.is_regex {
                    match Regex::new(&r.pattern) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!(pattern = %r.pattern, error = %e, "Skipping invalid rule pattern");
                            return None;
                        }
                    }
                } else {
                    None
                };
                Some(CompiledRule {
                    pattern: r.pattern.to_lowercase(),
                    regex,
                    category: r.category.clone(),
                })
            })
            .collect();

        let entries = categories
            .iter()
            .filter(|c| !c.is_income)
            .map(|c| KeywordEntry {
                category: c.name.clone(),
                keywords: keywords_for(&c.name),
            })
            .collect();

        let income_category = categories
            .iter()
            .find(|c| c.is_income)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Income".to_string());

        let fallback = categories
            .iter()
            .find(|c| c.is_default && !c.is_income)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Essentials".to_string());

        Self {
            rules: compiled,
            entries,
            income_category,
            fallback,
        }
    }

    /// Classify a transaction. Total: always returns a category name.
    pub fn classify(&self, description: &str, amount: f64) -> &str {
        if amount > 0.0 {
            return &self.income_category;
        }

        let desc_lower = description.to_lowercase();

        for rule in &self.rules {
            let matched = match &rule.regex {
                Some(re) => re.is_match(description),
                None => desc_lower.contains(&rule.pattern),
            };
            if matched {
                return &rule.category;
            }
        }

        for entry in &self.entries {
            if entry.keywords.iter().any(|k| desc_lower.contains(k)) {
                return &entry.category;
            }
        }

        &self.fallback
    }
}

/// One-shot classification matching the plain contract
pub fn classify(description: &str, amount: f64, categories: &[Category]) -> String {
    Classifier::new(categories)
        .classify(description, amount)
        .to_string()
}

fn keywords_for(category_name: &str) -> Vec<String> {
    let builtin: &[&str] = match category_name.to_lowercase().as_str() {
        "essentials" => ESSENTIALS_KEYWORDS,
        "wants" => WANTS_KEYWORDS,
        "savings" => SAVINGS_KEYWORDS,
        _ => return vec![category_name.to_lowercase()],
    };
    builtin.iter().map(|k| k.to_string()).collect()
}
