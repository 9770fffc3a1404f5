//! Absence allowance bookkeeping.

use serde::Serialize;

use crate::entities::AttendanceStatus;

/// Attendance counts for one user and how much of their allowance is left.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AbsenceSummary {
    pub allowed: i32,
    pub present: i32,
    pub late: i32,
    pub excused: i32,
    /// Unexcused absences; the only status that consumes the allowance
    pub used: i32,
    pub remaining: i32,
    pub exceeded: bool,
    pub total_recorded: i32,
    /// Percent of recorded meetings attended (present or late)
    pub attendance_rate: f64,
}

impl AbsenceSummary {
    pub fn compute<I>(allowed: i32, statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let (mut present, mut late, mut excused, mut used) = (0, 0, 0, 0);
        for status in statuses {
            match status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Late => late += 1,
                AttendanceStatus::Excused => excused += 1,
                AttendanceStatus::Absent => used += 1,
            }
        }

        let allowed = allowed.max(0);
        let total_recorded = present + late + excused + used;
        let attendance_rate = if total_recorded == 0 {
            100.0
        } else {
            f64::from(present + late) * 100.0 / f64::from(total_recorded)
        };

        Self {
            allowed,
            present,
            late,
            excused,
            used,
            remaining: (allowed - used).max(0),
            exceeded: used > allowed,
            total_recorded,
            attendance_rate,
        }
    }
}

/// Render a rate the way the attendance tables show it, e.g. `87.5%`.
pub fn format_percentage(rate: f64) -> String {
    format!("{:.1}%", rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttendanceStatus::*;

    #[test]
    fn test_no_records_is_full_attendance() {
        let summary = AbsenceSummary::compute(3, []);
        assert_eq!(summary.total_recorded, 0);
        assert_eq!(summary.remaining, 3);
        assert!(!summary.exceeded);
        assert_eq!(summary.attendance_rate, 100.0);
    }

    #[test]
    fn test_only_unexcused_absences_use_allowance() {
        let summary = AbsenceSummary::compute(2, [Present, Late, Excused, Absent, Excused]);
        assert_eq!(summary.used, 1);
        assert_eq!(summary.remaining, 1);
        assert_eq!(summary.excused, 2);
        assert_eq!(summary.total_recorded, 5);
        assert!((summary.attendance_rate - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exceeded_allowance_clamps_remaining() {
        let summary = AbsenceSummary::compute(1, [Absent, Absent, Absent, Present]);
        assert_eq!(summary.used, 3);
        assert_eq!(summary.remaining, 0);
        assert!(summary.exceeded);
    }

    #[test]
    fn test_using_exactly_the_allowance_is_not_exceeded() {
        let summary = AbsenceSummary::compute(2, [Absent, Absent]);
        assert_eq!(summary.remaining, 0);
        assert!(!summary.exceeded);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(87.5), "87.5%");
        assert_eq!(format_percentage(200.0 / 3.0), "66.7%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }
}
