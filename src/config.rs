//! Runtime configuration loaded from environment variables

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Holiday,
    Spring,
}

impl Theme {
    pub fn title(&self) -> &'static str {
        "The Price is Right"
    }

    pub fn edition(&self) -> &'static str {
        match self {
            Theme::Holiday => "Holiday Edition",
            Theme::Spring => "Spring Edition",
        }
    }
}

/// How players hand in their guesses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// One answer per question, following the host's current question
    #[default]
    PerQuestion,
    /// All 25 answers in a single submission
    Bulk,
}

impl SubmissionMode {
    pub fn describe(&self) -> &'static str {
        match self {
            SubmissionMode::PerQuestion => "one question at a time",
            SubmissionMode::Bulk => "all at once",
        }
    }
}

/// Theme and feature flags for a game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub theme: Theme,
    pub submission_mode: SubmissionMode,
    pub show_progress_bar: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            submission_mode: SubmissionMode::default(),
            show_progress_bar: true,
        }
    }
}

impl GameConfig {
    /// Load from GAME_THEME, SUBMISSION_MODE and SHOW_PROGRESS_BAR.
    /// Unknown values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let theme = match env_value("GAME_THEME").as_deref() {
            None => defaults.theme,
            Some("holiday") => Theme::Holiday,
            Some("spring") => Theme::Spring,
            Some(other) => {
                tracing::warn!("Unknown GAME_THEME '{}', using holiday", other);
                defaults.theme
            }
        };

        let submission_mode = match env_value("SUBMISSION_MODE").as_deref() {
            None => defaults.submission_mode,
            Some("per_question") => SubmissionMode::PerQuestion,
            Some("bulk") => SubmissionMode::Bulk,
            Some(other) => {
                tracing::warn!("Unknown SUBMISSION_MODE '{}', using per_question", other);
                defaults.submission_mode
            }
        };

        let show_progress_bar = match env_value("SHOW_PROGRESS_BAR").as_deref() {
            None => defaults.show_progress_bar,
            Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(other) => {
                tracing::warn!("Invalid SHOW_PROGRESS_BAR '{}', using default", other);
                defaults.show_progress_bar
            }
        };

        Self {
            theme,
            submission_mode,
            show_progress_bar,
        }
    }
}

/// Process-level settings: where to listen and where to keep snapshots
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Snapshot persistence is disabled when unset
    pub snapshot_path: Option<PathBuf>,
    pub snapshot_interval: Duration,
}

const DEFAULT_PORT: u16 = 6574;
const DEFAULT_SNAPSHOT_INTERVAL_MS: u64 = 2000;

impl ServerConfig {
    pub fn from_env() -> Self {
        let ip = match env_value("BIND_ADDR") {
            Some(raw) => raw.parse::<IpAddr>().unwrap_or_else(|_| {
                tracing::warn!("Invalid BIND_ADDR '{}', using 0.0.0.0", raw);
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match env_value("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let interval_ms = match env_value("SNAPSHOT_INTERVAL_MS") {
            Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid SNAPSHOT_INTERVAL_MS '{}', using {}",
                    raw,
                    DEFAULT_SNAPSHOT_INTERVAL_MS
                );
                DEFAULT_SNAPSHOT_INTERVAL_MS
            }),
            None => DEFAULT_SNAPSHOT_INTERVAL_MS,
        };

        Self {
            addr: SocketAddr::new(ip, port),
            static_dir: env_value("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            snapshot_path: env_value("SNAPSHOT_PATH").map(PathBuf::from),
            snapshot_interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Read a trimmed, non-empty environment variable
pub(crate) fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
