//! HTTP routes for the check-in operations
//!
//! Every endpoint answers 200 with the documented body. A missing, unknown
//! or expired session is treated as a logged-out caller, not as a 401.

use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use checkin_core::{CheckinResponse, CheckinStatus, PointsResponse, Session};
use checkin_engine::HOME_ROUTE;
use serde::{de::DeserializeOwned, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/checkin", post(handle_checkin))
        .route("/api/checkin/status", get(handle_checkin_status))
        .route("/api/points", get(handle_points))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Session resolution ────────────────────────────────────────────

/// Extract session token from the session cookie or a bearer header
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    // Check cookie first
    for cookie in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = cookie.to_str() {
            for part in cookie_str.split(';') {
                let Some((name, value)) = part.trim().split_once('=') else {
                    continue;
                };
                if name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Resolve the caller; lookup failures count as "not logged in"
async fn resolve_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = extract_session_token(headers)?;
    match state.sessions.resolve_session(&token, state.service.now()).await {
        Ok(session) => session,
        Err(e) => {
            warn!("Session lookup failed: {}", e);
            None
        }
    }
}

// ─── Page cache helpers ────────────────────────────────────────────

fn cache_key(session: &Session, part: &str) -> String {
    format!("{}/{}", session.user_id, part)
}

fn cached<T: DeserializeOwned>(state: &AppState, key: &str) -> Option<T> {
    let value = state.page_cache.get(HOME_ROUTE, key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => {
            debug!("Page cache hit for {}", key);
            Some(parsed)
        }
        Err(_) => None,
    }
}

fn store<T: Serialize>(state: &AppState, key: &str, value: &T) {
    if let Ok(json) = serde_json::to_value(value) {
        state.page_cache.insert(HOME_ROUTE, key, json);
    }
}

// ─── Handlers ──────────────────────────────────────────────────────

/// GET /api/health
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/checkin
async fn handle_checkin(State(state): State<AppState>, headers: HeaderMap) -> Json<CheckinResponse> {
    let session = resolve_session(&state, &headers).await;
    let outcome = state.service.check_in(session.as_ref()).await;
    Json(CheckinResponse::from(outcome))
}

/// GET /api/points
async fn handle_points(State(state): State<AppState>, headers: HeaderMap) -> Json<PointsResponse> {
    let Some(session) = resolve_session(&state, &headers).await else {
        return Json(PointsResponse {
            points: state.service.user_points(None).await,
        });
    };

    let key = cache_key(&session, "points");
    if let Some(points) = cached::<PointsResponse>(&state, &key) {
        return Json(points);
    }

    let points = PointsResponse {
        points: state.service.user_points(Some(&session)).await,
    };
    store(&state, &key, &points);
    Json(points)
}

/// GET /api/checkin/status
///
/// Not cached: the answer flips at UTC midnight and with the enabled flag.
async fn handle_checkin_status(State(state): State<AppState>, headers: HeaderMap) -> Json<CheckinStatus> {
    let session = resolve_session(&state, &headers).await;
    Json(state.service.checkin_status(session.as_ref()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; lang=en"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz789"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("xyz789"));
    }

    #[test]
    fn test_cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid=nope; session="));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_session_token(&headers), None);
    }
}
