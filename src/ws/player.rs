//! Player message handlers: joining, reconnecting and answering

use super::handlers::error_response;
use crate::protocol::ServerMessage;
use crate::state::{AppState, SessionStatus, SubmitOutcome};
use crate::types::{QuestionId, SessionToken};
use std::collections::BTreeMap;
use std::sync::Arc;

pub async fn handle_join(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    tracing::info!("Join request: {}", name);
    match state.join(&name).await {
        Ok((record, session_token)) => Some(ServerMessage::Joined {
            name: record.name,
            session_token,
            player_key: record.player_key,
        }),
        Err(e) => Some(error_response(e)),
    }
}

/// A cached identity is resumed only when its record exists and the client
/// holds that record's key
pub async fn handle_resume_session(
    state: &Arc<AppState>,
    name: String,
    session_token: Option<SessionToken>,
    player_key: Option<String>,
) -> Option<ServerMessage> {
    let status = state
        .resume_session(&name, session_token.as_deref())
        .await;
    tracing::debug!("Resume for {}: {:?}", name, status);

    let record = match status {
        SessionStatus::Valid(record) | SessionStatus::Provisional(Some(record)) => {
            Some(record).filter(|r| r.accepts_key(player_key.as_deref()))
        }
        SessionStatus::Provisional(None) | SessionStatus::Expired => None,
    };

    Some(match record {
        Some(record) => ServerMessage::SessionState {
            valid: true,
            answered: record.answers.keys().copied().collect(),
            name: record.name,
        },
        None => ServerMessage::SessionState {
            valid: false,
            name,
            answered: Vec::new(),
        },
    })
}

pub async fn handle_submit_answer(
    state: &Arc<AppState>,
    name: String,
    session_token: Option<SessionToken>,
    question_id: QuestionId,
    guess: String,
) -> Option<ServerMessage> {
    match state
        .submit_answer(&name, session_token.as_deref(), question_id, &guess)
        .await
    {
        Ok(SubmitOutcome::Recorded { .. }) => Some(ServerMessage::AnswerAccepted { question_id }),
        // Repeat clicks are dropped without a reply
        Ok(SubmitOutcome::AlreadyAnswered) => None,
        Err(e) => Some(error_response(e)),
    }
}

pub async fn handle_submit_all_answers(
    state: &Arc<AppState>,
    name: String,
    session_token: Option<SessionToken>,
    answers: BTreeMap<String, String>,
) -> Option<ServerMessage> {
    let mut sheet = BTreeMap::new();
    for (key, guess) in answers {
        let Ok(question_id) = key.trim().parse::<QuestionId>() else {
            return Some(ServerMessage::error(
                "UNKNOWN_QUESTION",
                format!("Unknown question {}", key),
            ));
        };
        sheet.insert(question_id, guess);
    }

    match state
        .submit_all_answers(&name, session_token.as_deref(), &sheet)
        .await
    {
        Ok(count) => Some(ServerMessage::AnswersAccepted { count }),
        Err(e) => Some(error_response(e)),
    }
}
