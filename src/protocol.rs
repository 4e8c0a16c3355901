use crate::config::GameConfig;
use crate::state::QuestionStatus;
use crate::types::*;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join with a new display name
    JoinGame {
        name: String,
    },
    /// Reconnect with a cached identity
    ResumeSession {
        name: String,
        session_token: Option<SessionToken>,
        #[serde(default)]
        player_key: Option<String>,
    },
    SubmitAnswer {
        name: String,
        session_token: Option<SessionToken>,
        question_id: QuestionId,
        #[serde(deserialize_with = "guess_text")]
        guess: String,
    },
    /// Bulk mode: the whole answer sheet at once, keyed by question id
    SubmitAllAnswers {
        name: String,
        session_token: Option<SessionToken>,
        #[serde(deserialize_with = "answer_sheet")]
        answers: BTreeMap<String, String>,
    },
    // Host-only messages
    HostStartGame,
    HostEndGame,
    HostNextQuestion,
    HostFinishGame,
    /// Remove all players and start a new session
    HostClearSubmissions,
    HostGetLeaderboard {
        #[serde(default)]
        top: Option<usize>,
    },
    HostGetAnswerKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        game: GameView,
        question: Option<PublicQuestion>,
        branding: Branding,
        server_now: String,
    },
    /// Broadcast whenever the game state changes
    GameState {
        game: GameView,
        /// The live question, if any
        question: Option<PublicQuestion>,
    },
    /// Sent to a player after a successful join. The client keeps
    /// `player_key` to resume this identity later.
    Joined {
        name: String,
        session_token: Option<SessionToken>,
        player_key: String,
    },
    /// Reply to ResumeSession
    SessionState {
        valid: bool,
        name: String,
        /// Question ids this player has already answered
        answered: Vec<QuestionId>,
    },
    /// Broadcast when the host clears all players; cached identities are void
    SubmissionsCleared {
        session_token: SessionToken,
    },
    AnswerAccepted {
        question_id: QuestionId,
    },
    AnswersAccepted {
        count: usize,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    /// Host-only: live answer status and player count
    HostStatus {
        players: usize,
        question: Option<QuestionStatus>,
    },
    AnswerKey {
        questions: Vec<Question>,
    },
    Error {
        code: String,
        msg: String,
    },
}

/// Game state as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameView {
    pub active: bool,
    pub current_question: u32,
    pub question_count: u32,
    pub phase: GamePhase,
    pub session_token: Option<SessionToken>,
    pub version: u64,
}

impl From<&GameState> for GameView {
    fn from(game: &GameState) -> Self {
        Self {
            active: game.active,
            current_question: game.current_question,
            question_count: QUESTION_COUNT,
            phase: game.phase(),
            session_token: game.session_token.clone(),
            version: game.version,
        }
    }
}

/// Theme strings and feature flags clients need for rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Branding {
    pub title: String,
    pub edition: String,
    pub theme: crate::config::Theme,
    pub submission_mode: crate::config::SubmissionMode,
    pub show_progress_bar: bool,
}

impl From<&GameConfig> for Branding {
    fn from(config: &GameConfig) -> Self {
        Self {
            title: config.theme.title().to_string(),
            edition: config.theme.edition().to_string(),
            theme: config.theme,
            submission_mode: config.submission_mode,
            show_progress_bar: config.show_progress_bar,
        }
    }
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}

/// A guess as typed by the player. Number inputs may arrive as JSON numbers;
/// they are kept in textual form so validation sees what the player entered.
struct GuessText(String);

impl<'de> Deserialize<'de> for GuessText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GuessVisitor;

        impl de::Visitor<'_> for GuessVisitor {
            type Value = GuessText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a guess as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<GuessText, E> {
                Ok(GuessText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<GuessText, E> {
                Ok(GuessText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<GuessText, E> {
                Ok(GuessText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<GuessText, E> {
                Ok(GuessText(v.to_string()))
            }

            // f64's Display never uses an exponent
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<GuessText, E> {
                Ok(GuessText(v.to_string()))
            }
        }

        deserializer.deserialize_any(GuessVisitor)
    }
}

fn guess_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    GuessText::deserialize(deserializer).map(|g| g.0)
}

fn answer_sheet<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let sheet = BTreeMap::<String, GuessText>::deserialize(deserializer)?;
    Ok(sheet.into_iter().map(|(id, guess)| (id, guess.0)).collect())
}
