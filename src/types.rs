use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque ID types for type safety
pub type QuestionId = u32;
/// Sanitized player name used as the storage key
pub type PlayerKey = String;
pub type SessionToken = String;

/// Number of questions in a game
pub const QUESTION_COUNT: u32 = 25;

/// `current_question` value once the last question has been played
pub const FINISHED_QUESTION: u32 = QUESTION_COUNT + 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub answer: i64,
}

/// Question as shown to players (no answer)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicQuestion {
    pub id: QuestionId,
    pub prompt: String,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Display name with original casing (trimmed)
    pub name: String,
    /// Raw guess text per question, set at most once per question
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, String>,
    pub total_score: u32,
    /// RFC 3339 timestamp of the last change
    pub timestamp: String,
    /// Handed to the joining client only; proves the identity on reconnect.
    /// Empty for records restored from snapshots that predate it.
    #[serde(default)]
    pub player_key: String,
}

impl PlayerRecord {
    pub fn new(name: String) -> Self {
        Self {
            name,
            answers: BTreeMap::new(),
            total_score: 0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            player_key: ulid::Ulid::new().to_string(),
        }
    }

    /// Whether a client-held key may resume this record
    pub fn accepts_key(&self, key: Option<&str>) -> bool {
        self.player_key.is_empty() || key == Some(self.player_key.as_str())
    }

    pub fn has_answered(&self, question_id: QuestionId) -> bool {
        self.answers.contains_key(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

/// Shared game/question state, mutated only by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub active: bool,
    /// 0 = not started, 1..=25 = live question, 26 = finished
    pub current_question: u32,
    /// Rotated whenever submissions are cleared; None until the first clear
    pub session_token: Option<SessionToken>,
    pub version: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            active: false,
            current_question: 0,
            session_token: None,
            version: 1,
        }
    }
}

impl GameState {
    pub fn phase(&self) -> GamePhase {
        if self.current_question == FINISHED_QUESTION {
            GamePhase::Finished
        } else if self.active && (1..=QUESTION_COUNT).contains(&self.current_question) {
            GamePhase::Live(self.current_question)
        } else {
            GamePhase::NotStarted
        }
    }

    /// The question players may currently answer, if any
    pub fn live_question(&self) -> Option<QuestionId> {
        match self.phase() {
            GamePhase::Live(q) => Some(q),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "question", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    NotStarted,
    Live(QuestionId),
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Player,
}

/// One row of the host leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub total_score: u32,
    pub answered: usize,
}
