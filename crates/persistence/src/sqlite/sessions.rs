//! Login sessions written by the authentication flow

use checkin_core::{Error, Result, Session, UserId};
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::SqlitePool;

/// Length of generated session tokens
const TOKEN_LEN: usize = 32;

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Open a session for a user, returning its token
pub async fn create_session(pool: &SqlitePool, user_id: &UserId, ttl: Duration) -> Result<String> {
    let token = generate_token();
    let expires_at = Utc::now() + ttl;

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id.as_str())
        .bind(expires_at)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(token)
}

/// Resolve a token to its session; expired sessions resolve to `None`
pub async fn get_session(pool: &SqlitePool, token: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
    let row: Option<(String, DateTime<Utc>)> =
        sqlx::query_as("SELECT user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row
        .map(|(user_id, expires_at)| Session::new(UserId(user_id), expires_at))
        .filter(|session| !session.is_expired(&now)))
}

/// Log a session out
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Delete every session that expired before `now`, returning how many
pub async fn purge_expired_sessions(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected())
}
