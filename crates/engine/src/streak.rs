//! Consecutive-day streak arithmetic
//!
//! Days are compared as UTC calendar dates. A check-in at 23:59 followed by
//! one at 00:01 counts as two consecutive days; two check-ins 20 hours apart
//! on the same date count as one day.

use checkin_core::UtcDay;

/// Whether the last check-in already happened on `today`
pub fn already_checked_in(last: Option<UtcDay>, today: UtcDay) -> bool {
    last == Some(today)
}

/// Streak after checking in on `today`
///
/// Continues from `prior` only when the last check-in was exactly the day
/// before; any gap (or no check-in at all) starts over at 1.
pub fn next_streak(last: Option<UtcDay>, prior: i64, today: UtcDay) -> i64 {
    if last == Some(today.previous()) {
        prior.max(0).saturating_add(1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> UtcDay {
        UtcDay::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_already_checked_in() {
        let today = day(2024, 6, 10);
        assert!(already_checked_in(Some(today), today));
        assert!(!already_checked_in(Some(day(2024, 6, 9)), today));
        assert!(!already_checked_in(None, today));
    }

    #[test]
    fn test_streak_continues_from_yesterday() {
        let today = day(2024, 6, 10);
        assert_eq!(next_streak(Some(day(2024, 6, 9)), 4, today), 5);
        assert_eq!(next_streak(Some(day(2024, 6, 9)), 0, today), 1);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let today = day(2024, 6, 10);
        assert_eq!(next_streak(Some(day(2024, 6, 7)), 7, today), 1);
        assert_eq!(next_streak(None, 0, today), 1);
        assert_eq!(next_streak(None, 12, today), 1);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        assert_eq!(next_streak(Some(day(2024, 2, 29)), 9, day(2024, 3, 1)), 10);
        assert_eq!(next_streak(Some(day(2023, 12, 31)), 2, day(2024, 1, 1)), 3);
    }
}
