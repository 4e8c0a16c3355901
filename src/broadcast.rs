use crate::protocol::{GameView, ServerMessage};
use crate::questions;
use crate::state::AppState;
use crate::types::{GameState, PublicQuestion};

impl AppState {
    /// Send a message to every connected client
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }

    /// Send a message to host clients only
    pub fn broadcast_to_host(&self, msg: ServerMessage) {
        let _ = self.host_broadcast.send(msg);
    }

    /// Push a game state snapshot (plus the live prompt) to everyone.
    /// Takes the snapshot by reference so callers can release their locks first.
    pub fn broadcast_game_state(&self, game: &GameState) {
        self.broadcast_to_all(game_state_message(game));
    }

    /// Refresh the host view: player count, live answer status and standings
    pub async fn broadcast_host_status(&self) {
        let players = self.player_count().await;
        let question = self.question_status().await;
        self.broadcast_to_host(ServerMessage::HostStatus { players, question });

        let entries = self.leaderboard(None).await;
        self.broadcast_to_host(ServerMessage::Leaderboard { entries });
    }
}

/// `GameState` message for a snapshot, carrying the live question's prompt
pub fn game_state_message(game: &GameState) -> ServerMessage {
    ServerMessage::GameState {
        game: GameView::from(game),
        question: live_prompt(game),
    }
}

pub fn live_prompt(game: &GameState) -> Option<PublicQuestion> {
    game.live_question()
        .and_then(questions::get)
        .map(PublicQuestion::from)
}
