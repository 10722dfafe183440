//! Daily check-in orchestration
//!
//! Every operation is total: store failures are logged here and turned into
//! the documented fallback values, never returned to the caller.

use crate::clock::{Clock, SystemClock};
use crate::ports::{CacheInvalidator, SettingsStore, UserRecordStore};
use crate::streak;
use checkin_core::settings::{self, RewardSetting, CHECKIN_ENABLED, CHECKIN_REWARD};
use checkin_core::{
    CheckinOutcome, CheckinRejection, CheckinStatus, CheckinUpdate, Result, Session, UserId, UtcDay,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Route whose cached data shows points and check-in state
pub const HOME_ROUTE: &str = "/";

/// Awards points once per UTC day and tracks the streak
pub struct CheckinService {
    users: Arc<dyn UserRecordStore>,
    settings: Arc<dyn SettingsStore>,
    invalidator: Arc<dyn CacheInvalidator>,
    clock: Arc<dyn Clock>,
}

impl CheckinService {
    pub fn new(
        users: Arc<dyn UserRecordStore>,
        settings: Arc<dyn SettingsStore>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            users,
            settings,
            invalidator,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock (tests, replays)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current instant according to the service clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn is_enabled(&self) -> Result<bool> {
        let raw = self.settings.get_setting(CHECKIN_ENABLED).await?;
        Ok(settings::checkin_enabled(raw.as_deref()))
    }

    async fn reward(&self) -> Result<i64> {
        let raw = self.settings.get_setting(CHECKIN_REWARD).await?;
        let setting = RewardSetting::from_raw(raw.as_deref());
        if let RewardSetting::Invalid(value) = &setting {
            warn!(
                "Ignoring invalid {} value {:?}, awarding {}",
                CHECKIN_REWARD,
                value,
                setting.amount()
            );
        }
        Ok(setting.amount())
    }

    /// Perform today's check-in for the caller
    pub async fn check_in(&self, session: Option<&Session>) -> CheckinOutcome {
        let Some(session) = session else {
            return CheckinRejection::NotLoggedIn.into();
        };

        match self.try_check_in(&session.user_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Check-in error for {}: {}", session.user_id, e);
                CheckinRejection::Failed(e.to_string()).into()
            }
        }
    }

    async fn try_check_in(&self, user_id: &UserId) -> Result<CheckinOutcome> {
        if !self.is_enabled().await? {
            return Ok(CheckinRejection::Disabled.into());
        }

        let Some(record) = self.users.find_checkin_record(user_id).await? else {
            warn!("No user record for authenticated user {}", user_id);
            return Ok(CheckinRejection::UserNotFound.into());
        };

        let now = self.clock.now();
        let today = UtcDay::of(&now);
        let last_day = record.last_checkin_day();

        if streak::already_checked_in(last_day, today) {
            debug!("{} already checked in on {}", user_id, today);
            return Ok(CheckinRejection::AlreadyCheckedIn.into());
        }

        let consecutive_days = streak::next_streak(last_day, record.consecutive_days(), today);
        let reward = self.reward().await?;

        let update = CheckinUpdate {
            reward,
            checked_in_at: now,
            consecutive_days,
        };
        if !self.users.apply_checkin(user_id, &update).await? {
            // A concurrent request recorded today's check-in first
            debug!("Check-in for {} on {} lost to a concurrent request", user_id, today);
            return Ok(CheckinRejection::AlreadyCheckedIn.into());
        }

        self.invalidator.invalidate(HOME_ROUTE);

        info!(
            "{} checked in on {}: +{} points, {} day streak",
            user_id, today, reward, consecutive_days
        );
        Ok(CheckinOutcome::CheckedIn {
            reward,
            consecutive_days,
        })
    }

    /// Current point balance of the caller, 0 when unknown
    pub async fn user_points(&self, session: Option<&Session>) -> i64 {
        let Some(session) = session else {
            return 0;
        };

        match self.users.find_points(&session.user_id).await {
            Ok(points) => points.unwrap_or(0),
            Err(e) => {
                error!("Failed to read points for {}: {}", session.user_id, e);
                0
            }
        }
    }

    /// Whether the caller has checked in today, and whether check-in is off
    pub async fn checkin_status(&self, session: Option<&Session>) -> CheckinStatus {
        let Some(session) = session else {
            return CheckinStatus::checked_in(false);
        };

        match self.try_checkin_status(&session.user_id).await {
            Ok(status) => status,
            Err(e) => {
                error!("[CheckinStatus] Error for {}: {}", session.user_id, e);
                CheckinStatus::checked_in(false)
            }
        }
    }

    async fn try_checkin_status(&self, user_id: &UserId) -> Result<CheckinStatus> {
        if !self.is_enabled().await? {
            return Ok(CheckinStatus::disabled());
        }

        let last_day = self
            .users
            .find_checkin_record(user_id)
            .await?
            .and_then(|record| record.last_checkin_day());

        let today = UtcDay::of(&self.clock.now());
        Ok(CheckinStatus::checked_in(streak::already_checked_in(last_day, today)))
    }
}
