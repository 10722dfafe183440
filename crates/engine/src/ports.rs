//! Collaborators the check-in service depends on
//!
//! Every fallible call returns an explicit `Result`; the service decides how
//! each failure is reported to the caller.

use async_trait::async_trait;
use checkin_core::{CheckinRecord, CheckinUpdate, Result, Session, UserId};
use chrono::{DateTime, Utc};

/// Resolves a session token to the authenticated caller
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` for unknown tokens and for sessions expired at `now`
    async fn resolve_session(&self, token: &str, now: DateTime<Utc>) -> Result<Option<Session>>;
}

/// Read access to the feature flag store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
}

/// Persisted per-user check-in state
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn find_checkin_record(&self, user_id: &UserId) -> Result<Option<CheckinRecord>>;

    async fn find_points(&self, user_id: &UserId) -> Result<Option<i64>>;

    /// Add `update.reward` to the stored balance and record the check-in.
    ///
    /// Must be a single conditional write: it only applies when the user has
    /// no check-in on the UTC day of `update.checked_in_at`. Returns `false`
    /// when nothing was written.
    async fn apply_checkin(&self, user_id: &UserId, update: &CheckinUpdate) -> Result<bool>;
}

/// Tells the UI layer that cached page data for a route is stale
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, route: &str);
}
