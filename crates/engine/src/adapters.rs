//! SQLite and page-cache implementations of the service collaborators

use crate::ports::{CacheInvalidator, SessionProvider, SettingsStore, UserRecordStore};
use async_trait::async_trait;
use checkin_core::{CheckinRecord, CheckinUpdate, Result, Session, UserId};
use checkin_persistence::{sqlite, Database, PageCache};
use chrono::{DateTime, Utc};

#[async_trait]
impl SessionProvider for Database {
    async fn resolve_session(&self, token: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
        sqlite::get_session(self.pool(), token, now).await
    }
}

#[async_trait]
impl SettingsStore for Database {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        sqlite::get_setting(self.pool(), key).await
    }
}

#[async_trait]
impl UserRecordStore for Database {
    async fn find_checkin_record(&self, user_id: &UserId) -> Result<Option<CheckinRecord>> {
        sqlite::get_checkin_record(self.pool(), user_id).await
    }

    async fn find_points(&self, user_id: &UserId) -> Result<Option<i64>> {
        sqlite::get_points(self.pool(), user_id).await
    }

    async fn apply_checkin(&self, user_id: &UserId, update: &CheckinUpdate) -> Result<bool> {
        sqlite::apply_checkin(self.pool(), user_id, update).await
    }
}

impl CacheInvalidator for PageCache {
    fn invalidate(&self, route: &str) {
        PageCache::invalidate(self, route);
    }
}
