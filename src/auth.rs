//! Shared-password gate for the host view and admin API.
//!
//! Uses HTTP Basic Authentication; the username is ignored and only the
//! password is checked against `ADMIN_PASSWORD`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Hex SHA-256 of the admin password (None = auth disabled)
    password_digest: Option<String>,
}

impl AuthConfig {
    /// Load auth config from the ADMIN_PASSWORD environment variable
    pub fn from_env() -> Self {
        match crate::config::env_value("ADMIN_PASSWORD") {
            Some(password) => {
                tracing::info!("Host authentication enabled");
                Self::with_password(&password)
            }
            None => {
                tracing::warn!("Host authentication DISABLED - anyone can access host panel!");
                Self::disabled()
            }
        }
    }

    pub fn with_password(password: &str) -> Self {
        Self {
            password_digest: Some(digest(password)),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.password_digest.is_some()
    }

    /// Check a candidate password
    pub fn validate(&self, password: &str) -> bool {
        match &self.password_digest {
            // Compare digests so the length check leaks nothing
            Some(expected) => constant_time_eq(expected.as_bytes(), digest(password).as_bytes()),
            None => true,
        }
    }

    /// Check the request's Basic credentials
    fn authorized(&self, request: &Request<Body>) -> bool {
        basic_password(request).is_some_and(|password| self.validate(&password))
    }
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Password part of a `Basic` Authorization header
fn basic_password(request: &Request<Body>) -> Option<String> {
    let header_value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let credentials = header_value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(credentials.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (_username, password) = decoded.split_once(':')?;
    Some(password.to_string())
}

fn query_param_equals(request: &Request<Body>, key: &str, expected: &str) -> bool {
    let Some(query) = request.uri().query() else {
        return false;
    };
    for pair in query.split('&') {
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        if k == key && v == expected {
            return true;
        }
    }
    false
}

fn unauthorized(realm: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, realm)],
        "Unauthorized",
    )
        .into_response()
}

/// Middleware for HTTP Basic Authentication on admin routes
pub async fn host_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !auth_config.is_enabled() || auth_config.authorized(&request) {
        return next.run(request).await;
    }

    tracing::warn!("Rejected unauthenticated request to {}", request.uri().path());
    unauthorized("Basic realm=\"Price is Right Host\"")
}

/// Middleware to require the admin password for host WebSocket connections.
///
/// Players connect to `/ws` freely; only `/ws?role=host` is gated.
pub async fn host_ws_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let is_host_ws = request.uri().path() == "/ws" && query_param_equals(&request, "role", "host");

    if !is_host_ws {
        return next.run(request).await;
    }

    if !auth_config.is_enabled() {
        tracing::warn!(
            "Host WebSocket requested but host authentication is DISABLED; set ADMIN_PASSWORD to prevent host takeover"
        );
        return next.run(request).await;
    }

    if auth_config.authorized(&request) {
        return next.run(request).await;
    }

    tracing::warn!("Rejected unauthenticated host WebSocket");
    unauthorized("Basic realm=\"Price is Right Host (WebSocket)\"")
}
