//! State export/import for backups and restarts.
//!
//! A snapshot holds everything the game needs to resume: the game state and
//! every player record, keyed the same way as in memory.

use super::AppState;
use crate::guess::sanitize_name;
use crate::questions;
use crate::scoring::calculate_total_score;
use crate::store::{StoreError, StoreResult};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema version for export format compatibility
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// A serializable snapshot of the entire game state.
///
/// Broadcast channels and config are runtime-only and not included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Schema version for forward compatibility
    pub schema_version: u32,
    /// Export timestamp (ISO8601)
    pub exported_at: String,
    pub game: GameState,
    /// Player records keyed by sanitized name
    #[serde(default)]
    pub submissions: HashMap<PlayerKey, PlayerRecord>,
}

impl GameSnapshot {
    pub fn new(game: GameState, submissions: HashMap<PlayerKey, PlayerRecord>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            game,
            submissions,
        }
    }

    /// Validate the snapshot before import
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version > EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Export schema version {} is newer than supported version {}. \
                 Please update the server.",
                self.schema_version, EXPORT_SCHEMA_VERSION
            ));
        }

        if self.game.current_question > FINISHED_QUESTION {
            return Err(format!(
                "Current question {} is out of range",
                self.game.current_question
            ));
        }

        for (key, record) in &self.submissions {
            if *key != sanitize_name(&record.name) {
                return Err(format!(
                    "Record '{}' is stored under mismatched key '{}'",
                    record.name, key
                ));
            }
            if let Some(id) = record
                .answers
                .keys()
                .find(|id| questions::get(**id).is_none())
            {
                return Err(format!(
                    "Record '{}' answers unknown question {}",
                    record.name, id
                ));
            }
            let expected = calculate_total_score(&record.answers);
            if record.total_score != expected {
                return Err(format!(
                    "Record '{}' has total score {} but its answers add up to {}",
                    record.name, record.total_score, expected
                ));
            }
        }

        Ok(())
    }
}

impl AppState {
    /// Take a consistent snapshot of the whole state
    pub async fn export_state(&self) -> GameSnapshot {
        let game = self.game.read().await;
        let submissions = self.submissions.read().await;
        GameSnapshot::new(game.clone(), submissions.clone())
    }

    /// Replace all current state with a snapshot and notify every client
    pub async fn import_state(&self, snapshot: GameSnapshot) -> StoreResult<()> {
        snapshot.validate().map_err(StoreError::Invalid)?;

        let mut game = self.game.write().await;
        let mut submissions = self.submissions.write().await;

        // Keep versions moving forward so clients never see an older one
        let version = game.version.max(snapshot.game.version) + 1;
        *game = snapshot.game;
        game.version = version;
        *submissions = snapshot.submissions;

        let game_snapshot = game.clone();
        let players = submissions.len();
        drop(submissions);
        drop(game);

        tracing::info!(
            "Imported snapshot: question {}, {} players",
            game_snapshot.current_question,
            players
        );
        self.bump_revision();
        self.broadcast_game_state(&game_snapshot);
        self.broadcast_host_status().await;
        Ok(())
    }
}
