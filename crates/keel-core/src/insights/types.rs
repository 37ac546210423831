//! Core types for the insight synthesizer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an insight message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Needs attention (overspend, missed deadline, low savings rate)
    Warning,
    /// Something is going well
    Success,
    /// Neutral observation or suggestion
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    /// Numeric priority for ranking (higher = shown first)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Warning => 3,
            Self::Success => 2,
            Self::Info => 1,
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "success" => Ok(InsightKind::Success),
            "info" => Ok(InsightKind::Info),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A short, classified observation or recommendation.
///
/// Ephemeral: recomputed from current state on every pass, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
    /// Optional call to action the UI can render as a button/link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Warning, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Info, message)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Group insights for display: warnings, then successes, then infos
pub fn group_by_kind(insights: &[Insight]) -> Vec<(InsightKind, Vec<&Insight>)> {
    [InsightKind::Warning, InsightKind::Success, InsightKind::Info]
        .iter()
        .map(|kind| {
            (
                *kind,
                insights.iter().filter(|i| i.kind == *kind).collect::<Vec<_>>(),
            )
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_priority() {
        assert!(InsightKind::Warning.priority() > InsightKind::Success.priority());
        assert!(InsightKind::Success.priority() > InsightKind::Info.priority());
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(InsightKind::from_str("warning").unwrap(), InsightKind::Warning);
        assert_eq!(InsightKind::Success.as_str(), "success");
        assert!(InsightKind::from_str("alert").is_err());
    }

    #[test]
    fn test_builder() {
        let insight = Insight::warning("Over budget").with_action("Review spending");
        assert_eq!(insight.kind, InsightKind::Warning);
        assert_eq!(insight.action.as_deref(), Some("Review spending"));
    }

    #[test]
    fn test_grouping_drops_empty_kinds() {
        let insights = vec![Insight::info("a"), Insight::warning("b"), Insight::info("c")];
        let groups = group_by_kind(&insights);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, InsightKind::Warning);
        assert_eq!(groups[1].1.len(), 2);
    }
}
