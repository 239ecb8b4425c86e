//! # Pulmo Core
//!
//! Core logic for the pediatric pulmonology assistant.
//!
//! This crate contains pure data and string processing:
//! - the condition catalog and the ordered keyword rules, loaded from an embedded YAML
//!   knowledge base
//! - first-match keyword classification of free text
//! - markdown rendering of condition reports and fixed guidance replies
//!
//! **No API concerns**: HTTP/gRPC servers, authentication, configuration and conversation
//! transcripts belong in `api-shared`, `api-rest` and `api-grpc`.

pub mod catalog;
pub mod classifier;
pub mod condition;
pub mod constants;
pub mod error;
pub mod knowledge_base;
pub mod responder;

pub use catalog::ConditionCatalog;
pub use classifier::{ClassificationRule, Classify, RuleSet};
pub use condition::{ConditionCategory, ConditionId, ConditionRecord, ConditionSummary};
pub use error::{AssistantError, AssistantResult};
pub use knowledge_base::KnowledgeBase;
pub use responder::{is_blank, Reply, ReplyKind, Responder};

/// Answer one user message using the built-in knowledge base.
///
/// Always returns a non-empty, user-facing string. If the knowledge base cannot be loaded the
/// reply is the apology message with the failure appended.
pub fn classify_and_respond(user_text: &str) -> String {
    reply(user_text).text
}

/// Same as [`classify_and_respond`], keeping the classification details.
pub fn reply(user_text: &str) -> Reply {
    match KnowledgeBase::builtin() {
        Ok(kb) => kb.responder().reply(user_text),
        Err(e) => Reply::apology(&e),
    }
}

/// Conditions of the built-in knowledge base, in declaration order.
pub fn list_conditions() -> AssistantResult<Vec<ConditionSummary>> {
    Ok(KnowledgeBase::builtin()?.catalog().summaries())
}

/// Stateless assistant operations shared by every host.
///
/// Cheap to clone; all clones read the same immutable knowledge base.
#[derive(Clone, Debug)]
pub struct AssistantService {
    knowledge_base: &'static KnowledgeBase,
}

impl AssistantService {
    /// Creates a service over the built-in knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::BuiltinUnavailable`] if the embedded data is invalid.
    pub fn new() -> AssistantResult<Self> {
        Ok(Self {
            knowledge_base: KnowledgeBase::builtin()?,
        })
    }

    /// Creates a service over a caller-supplied knowledge base.
    ///
    /// The knowledge base is leaked so that it lives as long as the process, matching the
    /// lifetime of the built-in one. Intended for startup-time configuration only.
    pub fn with_knowledge_base(knowledge_base: KnowledgeBase) -> Self {
        Self {
            knowledge_base: Box::leak(Box::new(knowledge_base)),
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.knowledge_base
    }

    /// Classify `user_text` and render the reply. Never fails.
    pub fn reply(&self, user_text: &str) -> Reply {
        self.knowledge_base.responder().reply(user_text)
    }

    pub fn list_conditions(&self) -> Vec<ConditionSummary> {
        self.knowledge_base.catalog().summaries()
    }

    pub fn example_questions(&self) -> &[String] {
        self.knowledge_base.examples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_and_respond_never_returns_empty() {
        for input in ["", " ", "wheeze", "nothing relevant", "ÄÖÜ ß 🫁"] {
            assert!(!classify_and_respond(input).is_empty());
        }
    }

    #[test]
    fn blank_input_returns_prompt() {
        assert_eq!(classify_and_respond(""), constants::EMPTY_INPUT_PROMPT);
        assert_eq!(classify_and_respond("   "), constants::EMPTY_INPUT_PROMPT);
    }

    #[test]
    fn single_keyword_inputs_name_their_condition() {
        let kb = KnowledgeBase::builtin().unwrap();
        for rule in kb.rules().rules() {
            let keyword = &rule.keywords[0];
            // Only exercise keywords no earlier rule would also catch.
            let first = kb.rules().first_match(keyword).unwrap();
            if first.condition_id != rule.condition_id {
                continue;
            }
            let input = format!("  {}!!", keyword.to_uppercase());
            let text = classify_and_respond(&input);
            let header = format!(
                "Possible Condition: {}**",
                rule.condition_id.display_name()
            );
            assert!(
                text.to_lowercase().contains(&header.to_lowercase()),
                "{input:?} did not produce {header:?}"
            );
        }
    }

    #[test]
    fn earlier_rule_wins_across_conditions() {
        // "fever" belongs to pneumonia, "nosebleed" to HHT and "wheez" to asthma.
        let matched = reply("fever with nosebleeds and wheezing");
        assert_eq!(matched.condition_id, Some(ConditionId::new("asthma")));

        let matched = reply("nosebleed and asbestos exposure");
        assert_eq!(
            matched.condition_id,
            Some(ConditionId::new("hereditary hemorrhagic telangiectasia"))
        );
    }

    #[test]
    fn list_conditions_includes_unruled_ards() {
        let conditions = list_conditions().unwrap();
        assert_eq!(conditions.len(), 14);
        assert!(conditions
            .iter()
            .any(|c| c.short_label == "Acute Respiratory Distress Syndrome (ARDS)"));
    }

    #[test]
    fn service_matches_free_functions() {
        let service = AssistantService::new().unwrap();
        let input = "Toddler has fever, chest pain, and is breathing fast";
        assert_eq!(service.reply(input).text, classify_and_respond(input));
        assert_eq!(service.example_questions().len(), 5);
    }

    #[test]
    fn service_with_custom_knowledge_base() {
        let kb = KnowledgeBase::parse(
            r#"
conditions:
  - id: "croup"
    category: common
    definition: "Upper airway swelling."
    symptoms: ["barking cough"]
    advice: "Cool night air may help."
rules:
  - condition_id: "croup"
    keywords: ["bark"]
"#,
        )
        .unwrap();
        let service = AssistantService::with_knowledge_base(kb);
        let reply = service.reply("a barking cough at night");
        assert_eq!(reply.kind, ReplyKind::Report);
        assert!(reply.text.contains("Possible Condition: Croup**"));
        assert!(!reply.text.contains("RED FLAGS"));
    }
}
