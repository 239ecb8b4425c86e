//! Declarative knowledge base: the condition catalog, the ordered rule set and the example
//! questions shown in help screens.
//!
//! The built-in data ships inside the binary as YAML (`data/knowledge_base.yaml`) and is parsed
//! and validated once, on first use. After that it is shared read-only.

use crate::catalog::ConditionCatalog;
use crate::classifier::{ClassificationRule, RuleSet};
use crate::condition::{ConditionCategory, ConditionId, ConditionRecord};
use crate::error::{AssistantError, AssistantResult};
use crate::responder::Responder;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;

const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.yaml");

static BUILTIN: LazyLock<Result<KnowledgeBase, String>> = LazyLock::new(|| {
    match KnowledgeBase::parse(BUILTIN_KNOWLEDGE_BASE) {
        Ok(kb) => {
            tracing::info!(
                conditions = kb.catalog.len(),
                rules = kb.rules.rules().len(),
                "loaded built-in knowledge base"
            );
            Ok(kb)
        }
        Err(e) => {
            tracing::error!("built-in knowledge base is invalid: {e}");
            Err(e.to_string())
        }
    }
});

/// Validated catalog plus rule set.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    catalog: ConditionCatalog,
    rules: RuleSet,
    examples: Vec<String>,
}

impl KnowledgeBase {
    /// Returns the knowledge base compiled into the crate.
    ///
    /// The first call parses and validates the embedded YAML; later calls reuse the result.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::BuiltinUnavailable`] if the embedded data failed validation.
    pub fn builtin() -> AssistantResult<&'static KnowledgeBase> {
        BUILTIN
            .as_ref()
            .map_err(|e| AssistantError::BuiltinUnavailable(e.clone()))
    }

    /// Parse and validate a knowledge base from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `rules[2].keywords`)
    /// to the failing field when the YAML does not match the schema.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError`] if:
    /// - the YAML does not match the schema or contains unknown keys,
    /// - a condition id is empty or declared twice,
    /// - a condition has an empty definition or advice,
    /// - a rule references a condition that is not in the catalog,
    /// - a rule has no keywords, or a keyword is empty or not lowercase.
    pub fn parse(yaml_text: &str) -> AssistantResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, KnowledgeBaseWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(AssistantError::KnowledgeBaseSchema {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        wire_to_domain(wire)
    }

    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Sample questions for help screens.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// A responder backed by this knowledge base's own rules.
    pub fn responder(&self) -> Responder<'_, &RuleSet> {
        Responder::new(&self.catalog, &self.rules)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeBaseWire {
    conditions: Vec<ConditionWire>,
    rules: Vec<RuleWire>,
    #[serde(default)]
    examples: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    id: String,
    short_label: Option<String>,
    category: ConditionCategory,
    definition: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    advice: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleWire {
    condition_id: String,
    keywords: Vec<String>,
}

fn wire_to_domain(wire: KnowledgeBaseWire) -> AssistantResult<KnowledgeBase> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(wire.conditions.len());

    for condition in wire.conditions {
        let id = condition.id.trim().to_owned();
        if id.is_empty() {
            return Err(AssistantError::InvalidInput(
                "condition id cannot be empty".into(),
            ));
        }
        if !seen.insert(id.clone()) {
            return Err(AssistantError::DuplicateCondition(id));
        }
        if condition.definition.trim().is_empty() {
            return Err(AssistantError::MissingConditionField {
                id,
                field: "definition",
            });
        }
        if condition.advice.trim().is_empty() {
            return Err(AssistantError::MissingConditionField {
                id,
                field: "advice",
            });
        }

        let id = ConditionId::new(id);
        let short_label = condition
            .short_label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| id.display_name());

        records.push(ConditionRecord {
            id,
            short_label,
            category: condition.category,
            definition: condition.definition,
            symptoms: condition.symptoms,
            red_flags: condition.red_flags,
            advice: condition.advice,
        });
    }

    let mut rules = Vec::with_capacity(wire.rules.len());
    for rule in wire.rules {
        if !seen.contains(rule.condition_id.as_str()) {
            return Err(AssistantError::UnknownRuleCondition(rule.condition_id));
        }
        if rule.keywords.is_empty() {
            return Err(AssistantError::InvalidInput(format!(
                "rule for {} has no keywords",
                rule.condition_id
            )));
        }
        if let Some(bad) = rule
            .keywords
            .iter()
            .find(|k| k.is_empty() || k.to_lowercase() != **k)
        {
            return Err(AssistantError::InvalidKeyword {
                condition_id: rule.condition_id.clone(),
                keyword: bad.clone(),
            });
        }

        rules.push(ClassificationRule {
            condition_id: ConditionId::new(rule.condition_id),
            keywords: rule.keywords,
        });
    }

    Ok(KnowledgeBase {
        catalog: ConditionCatalog::from_records(records),
        rules: RuleSet::from_rules(rules),
        examples: wire.examples,
    })
}
