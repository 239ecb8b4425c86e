//! Condition records held by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of a condition, e.g. `"asthma"` or `"chronic cough"`.
///
/// The raw key is used for lookup; [`ConditionId::display_name`] is what users see.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionId(String);

impl ConditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form of the id: underscores become spaces and every word is title-cased.
    ///
    /// ```
    /// use pulmo_core::ConditionId;
    /// assert_eq!(ConditionId::new("chronic_cough").display_name(), "Chronic Cough");
    /// ```
    pub fn display_name(&self) -> String {
        title_case(&self.0.replace('_', " "))
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConditionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Grouping used when listing conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Common,
    Specialized,
}

impl ConditionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Common => "common",
            ConditionCategory::Specialized => "specialized",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnosable condition.
///
/// `definition` and `advice` are guaranteed non-empty once loaded through
/// [`crate::KnowledgeBase`]; `symptoms` and `red_flags` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRecord {
    pub id: ConditionId,
    pub short_label: String,
    pub category: ConditionCategory,
    pub definition: String,
    pub symptoms: Vec<String>,
    pub red_flags: Vec<String>,
    pub advice: String,
}

impl ConditionRecord {
    pub fn summary(&self) -> ConditionSummary {
        ConditionSummary {
            id: self.id.as_str().to_owned(),
            short_label: self.short_label.clone(),
            category: self.category,
        }
    }
}

/// Listing entry for help screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSummary {
    pub id: String,
    pub short_label: String,
    pub category: ConditionCategory,
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_each_word() {
        let id = ConditionId::new("paradoxical vocal fold movement");
        assert_eq!(id.display_name(), "Paradoxical Vocal Fold Movement");
    }

    #[test]
    fn display_name_replaces_underscores() {
        let id = ConditionId::new("subglottic_stenosis");
        assert_eq!(id.display_name(), "Subglottic Stenosis");
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("ARDS-like 2nd case"), "Ards-Like 2Nd Case");
    }

    #[test]
    fn category_serialises_as_snake_case() {
        let json = serde_json::to_string(&ConditionCategory::Specialized).unwrap();
        assert_eq!(json, "\"specialized\"");
    }
}
