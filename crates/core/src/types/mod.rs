//! Shared type definitions and newtypes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A calendar day in UTC
///
/// Two instants are "the same day" when they share a `UtcDay`, regardless of
/// how many hours apart they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtcDay(NaiveDate);

impl UtcDay {
    /// The UTC day an instant falls on
    pub fn of(instant: &DateTime<Utc>) -> Self {
        UtcDay(instant.date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        UtcDay(date)
    }

    /// The calendar day before this one
    pub fn previous(&self) -> Self {
        UtcDay(self.0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    /// Midnight (00:00:00 UTC) at the start of this day
    pub fn start(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl fmt::Display for UtcDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
