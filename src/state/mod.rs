pub mod export;
mod game;
mod player;
mod score;
mod submission;

pub use player::SessionStatus;
pub use score::{PlayerAnswerStatus, QuestionStatus};
pub use submission::SubmitOutcome;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::protocol::ServerMessage;
use crate::types::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state.
///
/// Lock order is always `game` before `submissions`.
#[derive(Clone)]
pub struct AppState {
    pub config: GameConfig,
    pub game: Arc<RwLock<GameState>>,
    /// Player records keyed by sanitized name
    pub submissions: Arc<RwLock<HashMap<PlayerKey, PlayerRecord>>>,
    /// Bumped on every mutation; drives snapshot writes
    revision: Arc<AtomicU64>,
    /// Broadcast channel for sending messages to all clients
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Broadcast channel for sending messages to host clients only
    pub host_broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        let (host_tx, _host_rx) = broadcast::channel(100);
        Self {
            config,
            game: Arc::new(RwLock::new(GameState::default())),
            submissions: Arc::new(RwLock::new(HashMap::new())),
            revision: Arc::new(AtomicU64::new(0)),
            broadcast: tx,
            host_broadcast: host_tx,
        }
    }

    /// Current game state
    pub async fn get_game(&self) -> GameState {
        self.game.read().await.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// A cached session is good while it matches the current token, or while
    /// no token has been established yet
    fn check_session(game: &GameState, session_token: Option<&str>) -> Result<(), GameError> {
        match game.session_token.as_deref() {
            None => Ok(()),
            Some(current) if session_token == Some(current) => Ok(()),
            Some(_) => Err(GameError::SessionExpired),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
