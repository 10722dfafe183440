//! Check-in API operations

use crate::CheckinClient;
use checkin_core::{CheckinRejection, CheckinResponse, Result};
use tracing::info;

/// What [`claim_daily_checkin`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimResult {
    /// Check-in performed now
    Claimed { points: i64, consecutive_days: i64 },
    AlreadyClaimed,
    Disabled,
    /// The server refused with this message
    Refused(String),
}

/// Check in unless the status says it is already done or switched off
pub async fn claim_daily_checkin(client: &CheckinClient) -> Result<ClaimResult> {
    let status = client.checkin_status().await?;
    if status.disabled == Some(true) {
        return Ok(ClaimResult::Disabled);
    }
    if status.checked_in {
        return Ok(ClaimResult::AlreadyClaimed);
    }

    let response = client.check_in().await?;
    let result = ClaimResult::from(response);
    if let ClaimResult::Claimed {
        points,
        consecutive_days,
    } = &result
    {
        info!("Checked in: +{} points, {} day streak", points, consecutive_days);
    }
    Ok(result)
}

impl From<CheckinResponse> for ClaimResult {
    fn from(response: CheckinResponse) -> Self {
        if response.success {
            return ClaimResult::Claimed {
                points: response.points.unwrap_or(0),
                consecutive_days: response.consecutive_days.unwrap_or(0),
            };
        }

        let message = response.error.unwrap_or_default();
        if message == CheckinRejection::AlreadyCheckedIn.to_string() {
            ClaimResult::AlreadyClaimed
        } else if message == CheckinRejection::Disabled.to_string() {
            ClaimResult::Disabled
        } else {
            ClaimResult::Refused(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(message: &str) -> CheckinResponse {
        CheckinResponse {
            success: false,
            points: None,
            consecutive_days: None,
            error: Some(message.to_string()),
        }
    }

    #[test]
    fn test_claim_result_from_response() {
        let success = CheckinResponse {
            success: true,
            points: Some(10),
            consecutive_days: Some(3),
            error: None,
        };
        assert_eq!(
            ClaimResult::from(success),
            ClaimResult::Claimed {
                points: 10,
                consecutive_days: 3
            }
        );
        assert_eq!(
            ClaimResult::from(failure("Already checked in today")),
            ClaimResult::AlreadyClaimed
        );
        assert_eq!(
            ClaimResult::from(failure("Check-in is currently disabled")),
            ClaimResult::Disabled
        );
        assert_eq!(
            ClaimResult::from(failure("Not logged in")),
            ClaimResult::Refused("Not logged in".into())
        );
    }
}
