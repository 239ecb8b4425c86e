//! Turns one user message into one markdown reply.
//!
//! Every call is independent: the responder holds only the catalog and a classifier and never
//! sees earlier turns of a conversation.

use crate::catalog::ConditionCatalog;
use crate::classifier::Classify;
use crate::condition::{ConditionId, ConditionRecord};
use crate::constants::{
    ADVICE_HEADING, APOLOGY_PREFIX, BULLET, DEFINITION_HEADING, EMPTY_INPUT_PROMPT,
    MAX_SYMPTOMS_SHOWN, NO_MATCH_GUIDANCE, RED_FLAGS_HEADING, REPORT_DISCLAIMER,
    REPORT_HEADER_PREFIX, SYMPTOMS_HEADING, URGENT_BULLET,
};
use crate::error::AssistantResult;
use serde::Serialize;
use std::fmt::{self, Write};

/// Which branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Input was blank; the user is asked to describe symptoms.
    Prompt,
    /// No rule matched; the user is asked for more detail.
    Guidance,
    /// A catalogued condition was matched and reported in full.
    Report,
    /// A rule matched a condition that the catalog does not hold.
    Referral,
    /// An internal failure was absorbed.
    Apology,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Prompt => "prompt",
            ReplyKind::Guidance => "guidance",
            ReplyKind::Report => "report",
            ReplyKind::Referral => "referral",
            ReplyKind::Apology => "apology",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered reply and the classification behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub condition_id: Option<ConditionId>,
    pub text: String,
}

impl Reply {
    fn plain(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            condition_id: None,
            text: text.into(),
        }
    }

    /// Reply used when something went wrong internally. `detail` is shown to the user as
    /// plain text after the apology.
    pub fn apology(detail: &dyn fmt::Display) -> Self {
        Self::plain(ReplyKind::Apology, format!("{APOLOGY_PREFIX}{detail}"))
    }
}

/// Classifies a message and renders the matching reply.
#[derive(Debug, Clone)]
pub struct Responder<'a, C> {
    catalog: &'a ConditionCatalog,
    classifier: C,
}

impl<'a, C: Classify> Responder<'a, C> {
    pub fn new(catalog: &'a ConditionCatalog, classifier: C) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    /// Produce the reply for `user_text`.
    ///
    /// Blank input short-circuits to the prompt without consulting the classifier. A matched
    /// id that is missing from the catalog yields a referral rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AssistantError::Render`] if the report cannot be formatted.
    pub fn respond(&self, user_text: &str) -> AssistantResult<Reply> {
        if is_blank(user_text) {
            return Ok(Reply::plain(ReplyKind::Prompt, EMPTY_INPUT_PROMPT));
        }

        let Some(condition_id) = self.classifier.classify(user_text) else {
            return Ok(Reply::plain(ReplyKind::Guidance, NO_MATCH_GUIDANCE));
        };

        let reply = match self.catalog.get(condition_id.as_str()) {
            Some(record) => Reply {
                kind: ReplyKind::Report,
                text: render_report(record)?,
                condition_id: Some(condition_id),
            },
            None => {
                tracing::warn!(condition = %condition_id, "rule matched a condition missing from the catalog");
                Reply {
                    kind: ReplyKind::Referral,
                    text: render_referral(&condition_id),
                    condition_id: Some(condition_id),
                }
            }
        };

        Ok(reply)
    }

    /// Like [`Responder::respond`], but never fails: errors become an apology reply.
    pub fn reply(&self, user_text: &str) -> Reply {
        match self.respond(user_text) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("failed to produce reply: {e}");
                Reply::apology(&e)
            }
        }
    }
}

/// True when `text` holds nothing but whitespace.
///
/// Whitespace is Unicode `White_Space` plus the ASCII information separators `\x1c`..=`\x1f`,
/// the same set Python's `str.isspace` accepts.
pub fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Full markdown report for a catalogued condition.
///
/// Sections for symptoms, red flags and advice are omitted when empty. Only the first
/// [`MAX_SYMPTOMS_SHOWN`] symptoms are listed; red flags are always listed in full.
pub fn render_report(record: &ConditionRecord) -> Result<String, fmt::Error> {
    let mut out = String::new();

    write!(
        out,
        "{REPORT_HEADER_PREFIX}{}**\n\n",
        record.id.display_name()
    )?;
    write!(out, "{DEFINITION_HEADING}\n{}\n\n", record.definition)?;

    if !record.symptoms.is_empty() {
        writeln!(out, "{SYMPTOMS_HEADING}")?;
        for symptom in record.symptoms.iter().take(MAX_SYMPTOMS_SHOWN) {
            writeln!(out, "{BULLET}{symptom}")?;
        }
        out.push('\n');
    }

    if !record.red_flags.is_empty() {
        writeln!(out, "{RED_FLAGS_HEADING}")?;
        for flag in &record.red_flags {
            writeln!(out, "{URGENT_BULLET}{flag}")?;
        }
        out.push('\n');
    }

    if !record.advice.is_empty() {
        write!(out, "{ADVICE_HEADING}\n{}\n\n", record.advice)?;
    }

    out.push_str(REPORT_DISCLAIMER);
    Ok(out)
}

/// Reply for a condition the rules know about but the catalog does not describe.
pub fn render_referral(condition_id: &ConditionId) -> String {
    format!(
        "I identified this might be related to **{}**, but I need more information to provide specific guidance. Please consult a pediatric pulmonologist.",
        condition_id.display_name()
    )
}
