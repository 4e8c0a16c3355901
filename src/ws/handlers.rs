//! WebSocket message dispatch
//!
//! Authorization is checked here, then messages go to the role-specific
//! handler modules.

use crate::error::GameError;
use crate::guess::sanitize_name;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

use super::{host, player};

/// Return early with an error unless the connection is a host
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if *$role != Role::Host {
            return Some(ServerMessage::error(
                "UNAUTHORIZED",
                format!("Only host can {}", $action),
            ));
        }
    };
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        // Player messages
        ClientMessage::JoinGame { name } => player::handle_join(state, name).await,

        ClientMessage::ResumeSession {
            name,
            session_token,
            player_key,
        } => player::handle_resume_session(state, name, session_token, player_key).await,

        ClientMessage::SubmitAnswer {
            name,
            session_token,
            question_id,
            guess,
        } => player::handle_submit_answer(state, name, session_token, question_id, guess).await,

        ClientMessage::SubmitAllAnswers {
            name,
            session_token,
            answers,
        } => player::handle_submit_all_answers(state, name, session_token, answers).await,

        // Host-only commands
        ClientMessage::HostStartGame => {
            check_host!(role, "start the game");
            host::handle_start_game(state).await
        }

        ClientMessage::HostEndGame => {
            check_host!(role, "end the game");
            host::handle_end_game(state).await
        }

        ClientMessage::HostNextQuestion => {
            check_host!(role, "advance questions");
            host::handle_next_question(state).await
        }

        ClientMessage::HostFinishGame => {
            check_host!(role, "finish the game");
            host::handle_finish_game(state).await
        }

        ClientMessage::HostClearSubmissions => {
            check_host!(role, "clear submissions");
            host::handle_clear_submissions(state).await
        }

        ClientMessage::HostGetLeaderboard { top } => {
            check_host!(role, "view the leaderboard");
            host::handle_get_leaderboard(state, top).await
        }

        ClientMessage::HostGetAnswerKey => {
            check_host!(role, "view the answer key");
            host::handle_get_answer_key()
        }
    }
}

/// Per-socket session: the role, plus the player this connection has
/// joined or resumed as. Players may only submit under that name.
#[derive(Debug)]
pub struct Connection {
    role: Role,
    player: Option<String>,
}

impl Connection {
    pub fn new(role: Role) -> Self {
        Self { role, player: None }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Dispatch a message from this socket and track identity changes
    pub async fn handle(
        &mut self,
        msg: ClientMessage,
        state: &Arc<AppState>,
    ) -> Option<ServerMessage> {
        if let Some(rejection) = self.check_identity(&msg) {
            tracing::warn!("Rejected submission from {:?} for another player", self.player);
            return Some(rejection);
        }

        let response = handle_message(msg, &self.role, state).await;
        match &response {
            Some(ServerMessage::Joined { name, .. }) => self.player = Some(name.clone()),
            Some(ServerMessage::SessionState { valid, name, .. }) => {
                self.player = valid.then(|| name.clone());
            }
            _ => {}
        }
        response
    }

    fn check_identity(&self, msg: &ClientMessage) -> Option<ServerMessage> {
        if self.role == Role::Host {
            return None;
        }
        let name = match msg {
            ClientMessage::SubmitAnswer { name, .. } | ClientMessage::SubmitAllAnswers { name, .. } => {
                name
            }
            _ => return None,
        };
        match &self.player {
            Some(player) if sanitize_name(player) == sanitize_name(name) => None,
            Some(_) => Some(ServerMessage::error(
                "IDENTITY_MISMATCH",
                "You can only submit your own answers",
            )),
            None => Some(ServerMessage::error(
                "NOT_JOINED",
                "Please join the game first",
            )),
        }
    }
}

/// Turn a failed operation into an error reply. Transport failures are
/// logged in full and reported generically.
pub(super) fn error_response(err: GameError) -> ServerMessage {
    match &err {
        GameError::Store(source) => tracing::error!("Store failure: {}", source),
        other => tracing::warn!("Rejected: {}", other),
    }
    ServerMessage::error(err.code(), err.to_string())
}
