//! ATS score output models: a purely derived view over a resume snapshot,
//! recomputed on demand and never persisted.

use serde::{Deserialize, Serialize};

/// Suggestion priority. Ordering matters: critical issues sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Critical,
    Important,
    Optional,
}

/// One actionable improvement, keyed by a stable `id` for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub category: SuggestionCategory,
    /// Display grouping, e.g. "experience" or "skills".
    pub section: String,
    pub message: String,
    pub action: Option<String>,
}

impl Suggestion {
    pub fn new(
        id: &str,
        category: SuggestionCategory,
        section: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            section: section.to_string(),
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// The four independently computed sub-scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub completeness: u8,
    pub keywords: u8,
    pub formatting: u8,
    pub content: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    /// Weighted combination of the breakdown, 0–100.
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<Suggestion>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ordering_critical_first() {
        assert!(SuggestionCategory::Critical < SuggestionCategory::Important);
        assert!(SuggestionCategory::Important < SuggestionCategory::Optional);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&SuggestionCategory::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
    }

    #[test]
    fn test_suggestion_builder_sets_action() {
        let s = Suggestion::new("missing-name", SuggestionCategory::Critical, "personal", "Add your name")
            .with_action("Fill in the name field");
        assert_eq!(s.id, "missing-name");
        assert_eq!(s.action.as_deref(), Some("Fill in the name field"));
    }
}
