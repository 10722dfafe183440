//! Check-in columns of the `login_users` table

use checkin_core::{CheckinRecord, CheckinUpdate, Error, Result, UserId, UtcDay};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Database row for a user's check-in state
#[derive(Debug, sqlx::FromRow)]
struct CheckinRow {
    user_id: String,
    points: Option<i64>,
    last_checkin_at: Option<DateTime<Utc>>,
    consecutive_days: Option<i64>,
}

impl From<CheckinRow> for CheckinRecord {
    fn from(row: CheckinRow) -> Self {
        CheckinRecord {
            user_id: UserId(row.user_id),
            points: row.points,
            last_checkin_at: row.last_checkin_at,
            consecutive_days: row.consecutive_days,
        }
    }
}

/// Provision a user row with a zero balance and no check-ins
pub async fn create_user(pool: &SqlitePool, user_id: &UserId, username: Option<&str>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO login_users (user_id, username, points, consecutive_days)
        VALUES (?, ?, 0, 0)
        "#,
    )
    .bind(user_id.as_str())
    .bind(username)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Insert or overwrite the check-in columns for a user (imports, fixtures)
pub async fn save_checkin_record(pool: &SqlitePool, record: &CheckinRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO login_users (user_id, points, last_checkin_at, consecutive_days)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            points = excluded.points,
            last_checkin_at = excluded.last_checkin_at,
            consecutive_days = excluded.consecutive_days
        "#,
    )
    .bind(record.user_id.as_str())
    .bind(record.points)
    .bind(record.last_checkin_at)
    .bind(record.consecutive_days)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Get the check-in state of a user
pub async fn get_checkin_record(pool: &SqlitePool, user_id: &UserId) -> Result<Option<CheckinRecord>> {
    let row: Option<CheckinRow> = sqlx::query_as(
        r#"
        SELECT user_id, points, last_checkin_at, consecutive_days
        FROM login_users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id.as_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(CheckinRecord::from))
}

/// Get the point balance of a user (`None` if the user or the value is missing)
pub async fn get_points(pool: &SqlitePool, user_id: &UserId) -> Result<Option<i64>> {
    let row: Option<(Option<i64>,)> =
        sqlx::query_as("SELECT points FROM login_users WHERE user_id = ?")
            .bind(user_id.as_str())
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.and_then(|(points,)| points))
}

/// Record a check-in: add the reward, stamp the time, store the new streak
///
/// The balance is incremented inside the statement. The update only applies
/// if the user has not already checked in on the UTC day of
/// `update.checked_in_at`; returns `false` when that guard (or a missing
/// user) left the row untouched.
pub async fn apply_checkin(pool: &SqlitePool, user_id: &UserId, update: &CheckinUpdate) -> Result<bool> {
    let day_start = UtcDay::of(&update.checked_in_at).start();

    let result = sqlx::query(
        r#"
        UPDATE login_users
        SET points = COALESCE(points, 0) + ?,
            last_checkin_at = ?,
            consecutive_days = ?
        WHERE user_id = ?
          AND (last_checkin_at IS NULL OR julianday(last_checkin_at) < julianday(?))
        "#,
    )
    .bind(update.reward)
    .bind(update.checked_in_at)
    .bind(update.consecutive_days)
    .bind(user_id.as_str())
    .bind(day_start)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected() == 1)
}
