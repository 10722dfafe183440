//! Feature flags read from the settings store
//!
//! Settings are plain string key/value pairs edited out-of-band, so every
//! value has to be interpreted leniently here.

/// `"false"` switches the feature off; anything else (or nothing) leaves it on
pub const CHECKIN_ENABLED: &str = "checkin_enabled";

/// Points awarded per check-in, as an integer string
pub const CHECKIN_REWARD: &str = "checkin_reward";

/// Reward used when `checkin_reward` is absent or unusable
pub const DEFAULT_REWARD: i64 = 10;

/// Whether check-in is enabled for the given raw `checkin_enabled` value
pub fn checkin_enabled(raw: Option<&str>) -> bool {
    raw != Some("false")
}

/// Parse a base-10 integer prefix, the way `parseInt(s, 10)` does
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit. Returns `None` when no digit was found or the value
/// overflows.
pub fn parse_reward(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Interpreted `checkin_reward` setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardSetting {
    /// Setting absent or empty
    Default,
    Configured(i64),
    /// Present but not a non-negative integer; holds the raw value
    Invalid(String),
}

impl RewardSetting {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => RewardSetting::Default,
            Some(value) => match parse_reward(value) {
                Some(amount) if amount >= 0 => RewardSetting::Configured(amount),
                _ => RewardSetting::Invalid(value.to_string()),
            },
        }
    }

    /// Points to award; invalid settings fall back to [`DEFAULT_REWARD`]
    pub fn amount(&self) -> i64 {
        match self {
            RewardSetting::Configured(amount) => *amount,
            RewardSetting::Default | RewardSetting::Invalid(_) => DEFAULT_REWARD,
        }
    }
}
