//! Late excuse-request detection.

use chrono::{DateTime, Utc};

/// Fractional hours from `submitted_at` until `starts_at`. Negative once the
/// meeting has started.
pub fn hours_until(submitted_at: DateTime<Utc>, starts_at: DateTime<Utc>) -> f64 {
    (starts_at - submitted_at).num_milliseconds() as f64 / 3_600_000.0
}

/// A request is late when it arrives `threshold_hours` or less before the meeting.
pub fn is_late_request(submitted_at: DateTime<Utc>, starts_at: DateTime<Utc>, threshold_hours: i64) -> bool {
    hours_until(submitted_at, starts_at) <= threshold_hours as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn meeting() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_well_ahead_is_not_late() {
        let submitted = meeting() - Duration::hours(48);
        assert_eq!(hours_until(submitted, meeting()), 48.0);
        assert!(!is_late_request(submitted, meeting(), 24));
    }

    #[test]
    fn test_exactly_at_threshold_is_late() {
        let submitted = meeting() - Duration::hours(24);
        assert!(is_late_request(submitted, meeting(), 24));
    }

    #[test]
    fn test_just_over_threshold_is_not_late() {
        let submitted = meeting() - Duration::hours(24) - Duration::minutes(1);
        assert!(!is_late_request(submitted, meeting(), 24));
    }

    #[test]
    fn test_after_meeting_started_is_late() {
        let submitted = meeting() + Duration::minutes(30);
        assert!(hours_until(submitted, meeting()) < 0.0);
        assert!(is_late_request(submitted, meeting(), 24));
    }
}
