//! In-memory conversation transcripts.
//!
//! Transcripts are purely a display concern of the hosts: the assistant never reads them when
//! answering. They live only as long as the process. Each session keeps at most `max_turns`
//! turns, dropping the oldest first, and the store keeps at most `max_sessions` sessions,
//! dropping the least recently used one when a new session is opened at the cap.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One exchange as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptTurn {
    pub user: String,
    pub assistant: String,
    pub at: DateTime<Utc>,
}

impl TranscriptTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug)]
struct Session {
    turns: VecDeque<TranscriptTurn>,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<Uuid, Session>,
    // Monotonic use counter; a higher `last_used` means more recent.
    clock: u64,
}

impl Sessions {
    fn touch(&mut self, id: Uuid) -> ApiResult<&mut Session> {
        self.clock += 1;
        let now = self.clock;
        let session = self
            .by_id
            .get_mut(&id)
            .ok_or(ApiError::UnknownSession(id))?;
        session.last_used = now;
        Ok(session)
    }

    fn least_recently_used(&self) -> Option<Uuid> {
        self.by_id
            .iter()
            .min_by_key(|(_, session)| session.last_used)
            .map(|(id, _)| *id)
    }
}

/// Shared, thread-safe store of transcripts keyed by session id.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    sessions: Arc<Mutex<Sessions>>,
    max_turns: usize,
    max_sessions: usize,
}

impl TranscriptStore {
    /// Creates an empty store. Limits of zero are treated as one.
    pub fn new(max_turns: usize, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Sessions::default())),
            max_turns: max_turns.max(1),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Parse a client-supplied session id.
    pub fn parse_session_id(raw: &str) -> ApiResult<Uuid> {
        Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidSessionId(raw.to_string()))
    }

    /// Start a new, empty session and return its id.
    ///
    /// At the session cap the least recently used session is dropped first.
    pub fn open(&self) -> Uuid {
        let mut sessions = self.lock();
        while sessions.by_id.len() >= self.max_sessions {
            let Some(oldest) = sessions.least_recently_used() else {
                break;
            };
            sessions.by_id.remove(&oldest);
            tracing::debug!(session = %oldest, "evicted idle transcript session");
        }

        sessions.clock += 1;
        let id = Uuid::new_v4();
        let session = Session {
            turns: VecDeque::new(),
            last_used: sessions.clock,
        };
        sessions.by_id.insert(id, session);
        tracing::debug!(session = %id, "opened transcript session");
        id
    }

    pub fn contains(&self, session: Uuid) -> bool {
        self.lock().by_id.contains_key(&session)
    }

    /// Append a turn, evicting the oldest turns beyond the limit.
    pub fn append(&self, session: Uuid, turn: TranscriptTurn) -> ApiResult<()> {
        let mut sessions = self.lock();
        let turns = &mut sessions.touch(session)?.turns;

        turns.push_back(turn);
        while turns.len() > self.max_turns {
            turns.pop_front();
        }
        Ok(())
    }

    /// Turns of a session, oldest first.
    pub fn turns(&self, session: Uuid) -> ApiResult<Vec<TranscriptTurn>> {
        let mut sessions = self.lock();
        let turns = sessions.touch(session)?.turns.iter().cloned().collect();
        Ok(turns)
    }

    /// Remove every turn of a session. The session itself stays open.
    pub fn clear(&self, session: Uuid) -> ApiResult<()> {
        let mut sessions = self.lock();
        sessions.touch(session)?.turns.clear();
        tracing::debug!(session = %session, "cleared transcript");
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.lock().by_id.len()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        // Every mutation leaves the map consistent, so a poisoned lock is still usable.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
