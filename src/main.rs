use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricedash::{
    api, auth,
    config::{GameConfig, ServerConfig},
    state::AppState,
    store::{self, FileSnapshotStore, SnapshotStore},
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricedash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env();
    let game_config = GameConfig::from_env();
    tracing::info!(
        "Starting {} ({}), answers submitted {}",
        game_config.theme.title(),
        game_config.theme.edition(),
        game_config.submission_mode.describe()
    );

    let auth_config = Arc::new(auth::AuthConfig::from_env());
    let state = Arc::new(AppState::with_config(game_config));

    if let Some(path) = &server_config.snapshot_path {
        let snapshot_store: Arc<dyn SnapshotStore> = Arc::new(FileSnapshotStore::new(path));
        if let Err(e) = store::restore(&state, snapshot_store.as_ref()).await {
            // A bad snapshot should not keep the party from starting
            tracing::error!("Failed to restore snapshot from {}: {}", path.display(), e);
        }
        store::spawn_snapshot_writer(
            state.clone(),
            snapshot_store,
            server_config.snapshot_interval,
        );
    } else {
        tracing::warn!("SNAPSHOT_PATH not set, game state lives in memory only");
    }

    let app = api::router(state, auth_config)
        .fallback_service(ServeDir::new(&server_config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(server_config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", server_config.addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on http://{}", server_config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
