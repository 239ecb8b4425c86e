//! First-match keyword classification.
//!
//! A [`RuleSet`] is an ordered list of [`ClassificationRule`]s. Classification lowercases the
//! input once and walks the rules in order; the first rule with any keyword contained in the
//! lowercased text decides the result. Later rules are never consulted, even when they would
//! also match.
//!
//! Matching is plain substring containment. There is no tokenisation, stemming or scoring, so a
//! keyword such as `"wheez"` matches "wheezing" and "wheezes" alike, and `"bleeding"` matches in
//! any context.

use crate::condition::ConditionId;

/// Something that maps free text to at most one condition id.
pub trait Classify {
    fn classify(&self, text: &str) -> Option<ConditionId>;
}

impl<T: Classify + ?Sized> Classify for &T {
    fn classify(&self, text: &str) -> Option<ConditionId> {
        (**self).classify(text)
    }
}

/// Trigger keywords for one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub condition_id: ConditionId,
    /// Lowercase substrings, in declaration order.
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    /// Returns the first keyword contained in `lowered`, which must already be lowercase.
    pub fn matched_keyword(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| lowered.contains(keyword))
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.matched_keyword(lowered).is_some()
    }
}

/// Rules in priority order. Earlier rules win.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl RuleSet {
    pub(crate) fn from_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Condition ids in the order they are evaluated.
    pub fn priority(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.condition_id.as_str()).collect()
    }

    /// Returns the first matching rule for `text`.
    pub fn first_match(&self, text: &str) -> Option<&ClassificationRule> {
        let lowered = text.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl Classify for RuleSet {
    fn classify(&self, text: &str) -> Option<ConditionId> {
        let lowered = text.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.matched_keyword(&lowered) {
                tracing::debug!(
                    condition = %rule.condition_id,
                    keyword,
                    "classification matched"
                );
                return Some(rule.condition_id.clone());
            }
        }

        tracing::debug!("classification found no match");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, keywords: &[&str]) -> ClassificationRule {
        ClassificationRule {
            condition_id: ConditionId::new(id),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn sample() -> RuleSet {
        RuleSet::from_rules(vec![
            rule("asthma", &["wheez", "inhaler"]),
            rule("bronchiolitis", &["baby", "runny nose"]),
            rule("pneumonia", &["fever", "chest pain"]),
        ])
    }

    #[test]
    fn matches_keyword_as_substring() {
        let rules = sample();
        assert_eq!(
            rules.classify("He keeps wheezing"),
            Some(ConditionId::new("asthma"))
        );
    }

    #[test]
    fn match_ignores_input_case() {
        let rules = sample();
        assert_eq!(
            rules.classify("RUNNY NOSE!!!"),
            Some(ConditionId::new("bronchiolitis"))
        );
    }

    #[test]
    fn earliest_rule_wins_when_several_match() {
        let rules = sample();
        assert_eq!(
            rules.classify("fever, runny nose and wheezing"),
            Some(ConditionId::new("asthma"))
        );
        assert_eq!(
            rules.classify("baby with a fever"),
            Some(ConditionId::new("bronchiolitis"))
        );
    }

    #[test]
    fn no_keyword_means_no_match() {
        let rules = sample();
        assert_eq!(rules.classify("my child likes drawing"), None);
        assert_eq!(rules.classify(""), None);
    }

    #[test]
    fn keywords_match_inside_larger_words() {
        let rules = sample();
        assert_eq!(
            rules.classify("the babysitter noticed it"),
            Some(ConditionId::new("bronchiolitis"))
        );
    }

    #[test]
    fn first_match_reports_the_rule() {
        let rules = sample();
        let matched = rules.first_match("Chest pain today").expect("rule");
        assert_eq!(matched.condition_id.as_str(), "pneumonia");
        assert_eq!(matched.matched_keyword("chest pain today"), Some("chest pain"));
    }

    #[test]
    fn priority_lists_rules_in_declared_order() {
        assert_eq!(
            sample().priority(),
            vec!["asthma", "bronchiolitis", "pneumonia"]
        );
    }

    #[test]
    fn classify_through_reference() {
        let rules = sample();
        fn run<C: Classify>(classifier: C, text: &str) -> Option<ConditionId> {
            classifier.classify(text)
        }
        assert_eq!(run(&rules, "inhaler"), Some(ConditionId::new("asthma")));
    }
}
