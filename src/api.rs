//! HTTP API endpoints.
//!
//! Questions are public; standings, the answer key and state export/import
//! are for the host UI and sit behind the admin password.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{self, AuthConfig};
use crate::questions;
use crate::state::export::GameSnapshot;
use crate::state::AppState;
use crate::types::{LeaderboardEntry, PublicQuestion, Question};
use crate::ws;

/// Routes for the WebSocket endpoint and the JSON API
pub fn router(state: Arc<AppState>, auth_config: Arc<AuthConfig>) -> Router {
    let admin_routes = Router::new()
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/answers", get(answer_key))
        .route("/api/state/export", get(export_state))
        .route("/api/state/import", post(import_state))
        .layer(middleware::from_fn_with_state(
            auth_config.clone(),
            auth::host_auth_middleware,
        ));

    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .layer(middleware::from_fn_with_state(
            auth_config,
            auth::host_ws_auth_middleware,
        ));

    Router::new()
        .route("/api/questions", get(list_questions))
        .merge(admin_routes)
        .merge(ws_routes)
        .with_state(state)
}

/// GET /api/questions
pub async fn list_questions() -> Json<Vec<PublicQuestion>> {
    Json(questions::all().iter().map(PublicQuestion::from).collect())
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub top: Option<usize>,
}

/// GET /api/leaderboard?top=N
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    Json(state.leaderboard(query.top).await)
}

/// GET /api/answers
pub async fn answer_key() -> Json<Vec<Question>> {
    Json(questions::all().to_vec())
}

/// Export the entire game state as JSON.
///
/// GET /api/state/export
pub async fn export_state(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    Json(state.export_state().await)
}

/// Import a game state snapshot.
///
/// POST /api/state/import
///
/// Replaces all current state with the imported data and pushes the new
/// state to every connected client.
pub async fn import_state(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<GameSnapshot>,
) -> Response {
    match state.import_state(snapshot).await {
        Ok(()) => (StatusCode::OK, "State imported successfully").into_response(),
        Err(e) => {
            tracing::error!("State import failed: {}", e);
            (StatusCode::BAD_REQUEST, format!("Import failed: {}", e)).into_response()
        }
    }
}
