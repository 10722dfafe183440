//! Check-in results and the JSON shapes the front end consumes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a check-in did not award points
///
/// The `Display` text is exactly what the caller sees in `error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckinRejection {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Check-in is currently disabled")]
    Disabled,

    #[error("User record not found")]
    UserNotFound,

    #[error("Already checked in today")]
    AlreadyCheckedIn,

    #[error("Check-in failed: {0}")]
    Failed(String),
}

/// Result of a single check-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Points were awarded; `reward` is the amount added this time
    CheckedIn { reward: i64, consecutive_days: i64 },
    Rejected(CheckinRejection),
}

impl CheckinOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckinOutcome::CheckedIn { .. })
    }
}

impl From<CheckinRejection> for CheckinOutcome {
    fn from(rejection: CheckinRejection) -> Self {
        CheckinOutcome::Rejected(rejection)
    }
}

/// Response body of `POST /api/checkin`
///
/// `{success:true, points, consecutiveDays}` or `{success:false, error}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutive_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(outcome: CheckinOutcome) -> Self {
        match outcome {
            CheckinOutcome::CheckedIn {
                reward,
                consecutive_days,
            } => CheckinResponse {
                success: true,
                points: Some(reward),
                consecutive_days: Some(consecutive_days),
                error: None,
            },
            CheckinOutcome::Rejected(rejection) => CheckinResponse {
                success: false,
                points: None,
                consecutive_days: None,
                error: Some(rejection.to_string()),
            },
        }
    }
}

/// Response body of `GET /api/checkin/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinStatus {
    pub checked_in: bool,
    /// Only present (and `true`) while the feature is switched off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl CheckinStatus {
    pub fn checked_in(checked_in: bool) -> Self {
        Self {
            checked_in,
            disabled: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            checked_in: false,
            disabled: Some(true),
        }
    }
}

/// Response body of `GET /api/points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// The write applied by a successful check-in
///
/// `reward` is added to the stored balance inside the store; it is never
/// turned into an absolute value on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinUpdate {
    pub reward: i64,
    pub checked_in_at: DateTime<Utc>,
    pub consecutive_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let response = CheckinResponse::from(CheckinOutcome::CheckedIn {
            reward: 15,
            consecutive_days: 1,
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "points": 15, "consecutiveDays": 1})
        );
    }

    #[test]
    fn test_failure_messages() {
        let cases = [
            (CheckinRejection::NotLoggedIn, "Not logged in"),
            (CheckinRejection::Disabled, "Check-in is currently disabled"),
            (CheckinRejection::UserNotFound, "User record not found"),
            (CheckinRejection::AlreadyCheckedIn, "Already checked in today"),
            (
                CheckinRejection::Failed("disk I/O error".into()),
                "Check-in failed: disk I/O error",
            ),
        ];

        for (rejection, message) in cases {
            let response = CheckinResponse::from(CheckinOutcome::from(rejection));
            assert_eq!(
                serde_json::to_value(&response).unwrap(),
                json!({"success": false, "error": message})
            );
        }
    }

    #[test]
    fn test_status_shape() {
        assert_eq!(
            serde_json::to_value(CheckinStatus::checked_in(true)).unwrap(),
            json!({"checkedIn": true})
        );
        assert_eq!(
            serde_json::to_value(CheckinStatus::disabled()).unwrap(),
            json!({"checkedIn": false, "disabled": true})
        );

        let parsed: CheckinStatus = serde_json::from_str(r#"{"checkedIn":false}"#).unwrap();
        assert_eq!(parsed, CheckinStatus::checked_in(false));
    }
}
