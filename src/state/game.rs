use super::AppState;
use crate::error::GameError;
use crate::types::*;

impl AppState {
    /// NotStarted -> Live(1)
    pub async fn start_game(&self) -> Result<GameState, GameError> {
        let mut game = self.game.write().await;
        if game.active {
            return Err(GameError::InvalidTransition(
                "Game is already active".to_string(),
            ));
        }

        game.active = true;
        game.current_question = 1;
        game.version += 1;
        let snapshot = game.clone();
        drop(game);

        tracing::info!("Game started at question 1");
        self.on_game_changed(&snapshot).await;
        Ok(snapshot)
    }

    /// Live(q) -> Live(q + 1), or Live(25) -> Finished
    pub async fn advance_question(&self) -> Result<GameState, GameError> {
        let mut game = self.game.write().await;
        let GamePhase::Live(current) = game.phase() else {
            return Err(GameError::InvalidTransition(format!(
                "Cannot advance from {:?}",
                game.phase()
            )));
        };

        game.current_question = current + 1;
        game.version += 1;
        let snapshot = game.clone();
        drop(game);

        if snapshot.phase() == GamePhase::Finished {
            tracing::info!("Advanced past the last question, game finished");
        } else {
            tracing::info!("Advanced to question {}", snapshot.current_question);
        }
        self.on_game_changed(&snapshot).await;
        Ok(snapshot)
    }

    /// Live(q) -> Finished
    pub async fn finish_game(&self) -> Result<GameState, GameError> {
        let mut game = self.game.write().await;
        if game.live_question().is_none() {
            return Err(GameError::InvalidTransition(format!(
                "Cannot finish from {:?}",
                game.phase()
            )));
        }

        game.current_question = FINISHED_QUESTION;
        game.version += 1;
        let snapshot = game.clone();
        drop(game);

        tracing::info!("Game finished");
        self.on_game_changed(&snapshot).await;
        Ok(snapshot)
    }

    /// Any -> NotStarted. Player records are kept.
    pub async fn end_game(&self) -> GameState {
        let mut game = self.game.write().await;
        game.active = false;
        game.current_question = 0;
        game.version += 1;
        let snapshot = game.clone();
        drop(game);

        tracing::info!("Game ended");
        self.on_game_changed(&snapshot).await;
        snapshot
    }

    /// Remove every player record and rotate the session token, forcing all
    /// connected players to rejoin. Returns the new token.
    pub async fn clear_submissions(&self) -> SessionToken {
        let mut game = self.game.write().await;
        let mut submissions = self.submissions.write().await;

        let removed = submissions.len();
        submissions.clear();

        let token = ulid::Ulid::new().to_string();
        game.session_token = Some(token.clone());
        game.version += 1;
        let snapshot = game.clone();
        drop(submissions);
        drop(game);

        tracing::info!(
            "Cleared {} player records, new session {}",
            removed,
            token
        );
        self.bump_revision();
        self.broadcast_to_all(crate::protocol::ServerMessage::SubmissionsCleared {
            session_token: token.clone(),
        });
        self.broadcast_game_state(&snapshot);
        self.broadcast_host_status().await;
        token
    }

    async fn on_game_changed(&self, game: &GameState) {
        self.bump_revision();
        self.broadcast_game_state(game);
        self.broadcast_host_status().await;
    }
}
