//! Host-only command handlers
//!
//! Authorization is checked in the dispatch layer before calling these.
//! Successful state changes reach the host through the broadcast channels,
//! so most handlers only reply on failure.

use super::handlers::error_response;
use crate::protocol::ServerMessage;
use crate::questions;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_start_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host starting game");
    state.start_game().await.err().map(error_response)
}

pub async fn handle_end_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host ending game");
    state.end_game().await;
    None
}

pub async fn handle_next_question(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host advancing question");
    state.advance_question().await.err().map(error_response)
}

pub async fn handle_finish_game(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host finishing game");
    state.finish_game().await.err().map(error_response)
}

pub async fn handle_clear_submissions(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host clearing all submissions");
    state.clear_submissions().await;
    None
}

pub async fn handle_get_leaderboard(
    state: &Arc<AppState>,
    top: Option<usize>,
) -> Option<ServerMessage> {
    Some(ServerMessage::Leaderboard {
        entries: state.leaderboard(top).await,
    })
}

pub fn handle_get_answer_key() -> Option<ServerMessage> {
    Some(ServerMessage::AnswerKey {
        questions: questions::all().to_vec(),
    })
}
