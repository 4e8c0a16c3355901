use super::AppState;
use crate::error::GameError;
use crate::guess::{normalize_name, sanitize_name};
use crate::types::*;

/// Outcome of checking a returning client's cached identity
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Token matches and the record still exists
    Valid(PlayerRecord),
    /// No session token has been established yet, so the cached identity is
    /// accepted as-is
    Provisional(Option<PlayerRecord>),
    /// The session was rotated (or the record is gone); the player must rejoin
    Expired,
}

impl AppState {
    /// Join the game under a display name.
    ///
    /// Names are compared case-insensitively; two names that sanitize to the
    /// same storage key are also treated as a collision.
    pub async fn join(
        &self,
        name: &str,
    ) -> Result<(PlayerRecord, Option<SessionToken>), GameError> {
        let display_name = name.trim();
        if display_name.is_empty() {
            return Err(GameError::NameRequired);
        }

        let game = self.game.read().await;
        if !game.active {
            return Err(GameError::GameNotActive);
        }

        let key = sanitize_name(display_name);
        let normalized = normalize_name(display_name);

        let mut submissions = self.submissions.write().await;
        let taken = submissions.contains_key(&key)
            || submissions
                .values()
                .any(|p| normalize_name(&p.name) == normalized);
        if taken {
            tracing::info!("Join rejected, name taken: {}", display_name);
            return Err(GameError::NameTaken);
        }

        let record = PlayerRecord::new(display_name.to_string());
        submissions.insert(key, record.clone());
        let token = game.session_token.clone();
        drop(submissions);
        drop(game);

        tracing::info!("Player joined: {}", record.name);
        self.bump_revision();
        self.broadcast_host_status().await;
        Ok((record, token))
    }

    /// Check a cached `(name, token)` pair from a reconnecting client
    pub async fn resume_session(&self, name: &str, session_token: Option<&str>) -> SessionStatus {
        let game = self.game.read().await;
        let record = self.get_player(name).await;

        match game.session_token.as_deref() {
            None => SessionStatus::Provisional(record),
            Some(current) if session_token == Some(current) => match record {
                Some(record) => SessionStatus::Valid(record),
                None => SessionStatus::Expired,
            },
            Some(_) => SessionStatus::Expired,
        }
    }

    /// Get a player record by display name
    pub async fn get_player(&self, name: &str) -> Option<PlayerRecord> {
        self.submissions
            .read()
            .await
            .get(&sanitize_name(name))
            .cloned()
    }

    pub async fn player_count(&self) -> usize {
        self.submissions.read().await.len()
    }
}
