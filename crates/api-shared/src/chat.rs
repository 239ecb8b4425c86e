//! Chat turns for hosts that keep a transcript.
//!
//! [`ChatService`] pairs the stateless assistant with a [`TranscriptStore`]. Each message is
//! answered on its own; the transcript is only recorded for display. Blank messages are
//! answered with the prompt but are not recorded, and never open a session.

use crate::error::{ApiError, ApiResult};
use crate::pb;
use crate::transcript::{TranscriptStore, TranscriptTurn};
use pulmo_core::{is_blank, AssistantService, ConditionSummary, Reply};
use uuid::Uuid;

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// `None` only when a blank message arrived without a session.
    pub session_id: Option<Uuid>,
    pub reply: Reply,
    pub turns: Vec<TranscriptTurn>,
}

#[derive(Debug, Clone)]
pub struct ChatService {
    assistant: AssistantService,
    transcripts: TranscriptStore,
}

impl ChatService {
    pub fn new(assistant: AssistantService, transcripts: TranscriptStore) -> Self {
        Self {
            assistant,
            transcripts,
        }
    }

    pub fn assistant(&self) -> &AssistantService {
        &self.assistant
    }

    pub fn transcripts(&self) -> &TranscriptStore {
        &self.transcripts
    }

    /// Answer `message` within a session.
    ///
    /// A missing or blank `session_id` opens a new session, unless `message` is blank too.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApiError::InvalidSessionId`] if `session_id` is not a UUID and
    /// [`crate::ApiError::UnknownSession`] if it names no open session.
    pub fn chat(&self, session_id: Option<&str>, message: &str) -> ApiResult<ChatOutcome> {
        let blank = is_blank(message);
        let session_id = match session_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let id = TranscriptStore::parse_session_id(raw)?;
                // Fail before answering so a stale id never silently drops a turn.
                if !self.transcripts.contains(id) {
                    return Err(ApiError::UnknownSession(id));
                }
                Some(id)
            }
            None if blank => None,
            None => Some(self.transcripts.open()),
        };

        let reply = self.assistant.reply(message);
        tracing::info!(
            session = ?session_id,
            kind = %reply.kind,
            condition = reply.condition_id.as_ref().map(|c| c.as_str()).unwrap_or(""),
            "chat turn answered"
        );

        let Some(id) = session_id else {
            return Ok(ChatOutcome {
                session_id: None,
                reply,
                turns: Vec::new(),
            });
        };

        if !blank {
            self.transcripts
                .append(id, TranscriptTurn::new(message, reply.text.clone()))?;
        }

        Ok(ChatOutcome {
            session_id,
            turns: self.transcripts.turns(id)?,
            reply,
        })
    }

    pub fn transcript(&self, session_id: &str) -> ApiResult<Vec<TranscriptTurn>> {
        let id = TranscriptStore::parse_session_id(session_id)?;
        self.transcripts.turns(id)
    }

    pub fn clear(&self, session_id: &str) -> ApiResult<()> {
        let id = TranscriptStore::parse_session_id(session_id)?;
        self.transcripts.clear(id)
    }
}

// ============================================================================
// Wire conversions
// ============================================================================

impl From<&TranscriptTurn> for pb::Turn {
    fn from(turn: &TranscriptTurn) -> Self {
        pb::Turn {
            user: turn.user.clone(),
            assistant: turn.assistant.clone(),
            at: turn.at.to_rfc3339(),
        }
    }
}

impl From<&ConditionSummary> for pb::Condition {
    fn from(summary: &ConditionSummary) -> Self {
        pb::Condition {
            id: summary.id.clone(),
            short_label: summary.short_label.clone(),
            category: summary.category.as_str().to_string(),
        }
    }
}

impl From<&Reply> for pb::AskRes {
    fn from(reply: &Reply) -> Self {
        pb::AskRes {
            reply: reply.text.clone(),
            kind: reply.kind.as_str().to_string(),
            condition_id: reply
                .condition_id
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<ChatOutcome> for pb::ChatRes {
    fn from(outcome: ChatOutcome) -> Self {
        let ask = pb::AskRes::from(&outcome.reply);
        pb::ChatRes {
            session_id: outcome
                .session_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            reply: ask.reply,
            kind: ask.kind,
            condition_id: ask.condition_id,
            turns: outcome.turns.iter().map(pb::Turn::from).collect(),
        }
    }
}

pub fn transcript_res(session_id: &str, turns: &[TranscriptTurn]) -> pb::TranscriptRes {
    pb::TranscriptRes {
        session_id: session_id.trim().to_string(),
        turns: turns.iter().map(pb::Turn::from).collect(),
    }
}

pub fn list_conditions_res(conditions: &[ConditionSummary]) -> pb::ListConditionsRes {
    pb::ListConditionsRes {
        conditions: conditions.iter().map(pb::Condition::from).collect(),
    }
}
