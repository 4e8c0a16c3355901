//! Error types shared by the state layer and the protocol handlers

use crate::types::QuestionId;

/// Why a submitted guess was refused. Messages are shown to players as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GuessError {
    #[error("Please enter an answer")]
    Empty,

    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Answer is out of range")]
    OutOfRange,

    #[error("Please enter a plain number (no scientific notation)")]
    ScientificNotation,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Please enter your name")]
    NameRequired,

    #[error("That name is taken, please choose another.")]
    NameTaken,

    #[error("The game hasn't started yet")]
    GameNotActive,

    #[error("{0}")]
    InvalidTransition(String),

    #[error("Question {0} is not open for answers")]
    QuestionNotOpen(QuestionId),

    #[error("Unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("Question {question_id}: {source}")]
    InvalidGuess {
        question_id: QuestionId,
        #[source]
        source: GuessError,
    },

    #[error("Your session has ended, please rejoin")]
    SessionExpired,

    #[error("Player not found, please rejoin")]
    UnknownPlayer,

    #[error("Answers are submitted {0} in this game")]
    WrongSubmissionMode(&'static str),

    #[error("Something went wrong, please try again")]
    Store(#[from] crate::store::StoreError),
}

impl GameError {
    /// Protocol error code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NameRequired => "NAME_REQUIRED",
            GameError::NameTaken => "NAME_TAKEN",
            GameError::GameNotActive => "GAME_NOT_ACTIVE",
            GameError::InvalidTransition(_) => "TRANSITION_FAILED",
            GameError::QuestionNotOpen(_) => "QUESTION_NOT_OPEN",
            GameError::UnknownQuestion(_) => "UNKNOWN_QUESTION",
            GameError::InvalidGuess { .. } => "INVALID_GUESS",
            GameError::SessionExpired => "SESSION_EXPIRED",
            GameError::UnknownPlayer => "UNKNOWN_PLAYER",
            GameError::WrongSubmissionMode(_) => "WRONG_SUBMISSION_MODE",
            GameError::Store(_) => "STORE_ERROR",
        }
    }
}
