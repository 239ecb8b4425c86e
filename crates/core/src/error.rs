/// Errors raised while loading the knowledge base or producing a reply.
///
/// None of these reach an end user as a crash: [`crate::classify_and_respond`] converts every
/// variant into the apology message.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("knowledge base schema mismatch at {path}: {message}")]
    KnowledgeBaseSchema { path: String, message: String },

    #[error("duplicate condition id: {0}")]
    DuplicateCondition(String),

    #[error("condition {id} is missing required field {field}")]
    MissingConditionField { id: String, field: &'static str },

    #[error("rule references unknown condition: {0}")]
    UnknownRuleCondition(String),

    #[error("rule for {condition_id} has an invalid keyword {keyword:?}")]
    InvalidKeyword {
        condition_id: String,
        keyword: String,
    },

    #[error("built-in knowledge base failed to load: {0}")]
    BuiltinUnavailable(String),

    #[error("failed to render reply: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type AssistantResult<T> = std::result::Result<T, AssistantError>;
