//! User-related models

use crate::types::{UserId, UtcDay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated caller as resolved by the session provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self { user_id, expires_at }
    }

    pub fn is_expired(&self, now: &DateTime<Utc>) -> bool {
        self.expires_at <= *now
    }
}

/// Per-user check-in state (the check-in columns of the user row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    pub user_id: UserId,
    /// Point balance, `None` when the column was never set
    pub points: Option<i64>,
    pub last_checkin_at: Option<DateTime<Utc>>,
    pub consecutive_days: Option<i64>,
}

impl CheckinRecord {
    /// A freshly provisioned user that has never checked in
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            points: Some(0),
            last_checkin_at: None,
            consecutive_days: Some(0),
        }
    }

    pub fn points(&self) -> i64 {
        self.points.unwrap_or(0)
    }

    pub fn consecutive_days(&self) -> i64 {
        self.consecutive_days.unwrap_or(0)
    }

    /// UTC day of the last successful check-in
    pub fn last_checkin_day(&self) -> Option<UtcDay> {
        self.last_checkin_at.as_ref().map(UtcDay::of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_null_columns_read_as_zero() {
        let record = CheckinRecord {
            user_id: UserId::new("u1"),
            points: None,
            last_checkin_at: None,
            consecutive_days: None,
        };
        assert_eq!(record.points(), 0);
        assert_eq!(record.consecutive_days(), 0);
        assert!(record.last_checkin_day().is_none());
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let session = Session::new(UserId::new("u1"), now + Duration::minutes(5));
        assert!(!session.is_expired(&now));
        assert!(session.is_expired(&(now + Duration::minutes(5))));
    }
}
