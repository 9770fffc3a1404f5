use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use super::RollcallService;
use crate::entities::{attendance, meeting, AttendanceStatus};
use crate::error::{Result, RollcallError};
use crate::repositories::{AttendanceRepository, RoleRepository, UserRepository};
use crate::rules::{format_percentage, AbsenceSummary};

/// One of a user's attendance records with the meeting it belongs to.
#[derive(Clone, Debug, Serialize)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: attendance::Model,
    pub meeting: Option<meeting::Model>,
}

/// A row of the organization-wide attendance report.
#[derive(Clone, Debug, Serialize)]
pub struct UserAbsenceReport {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
    pub summary: AbsenceSummary,
    /// `attendance_rate` formatted for display
    pub attendance: String,
}

impl RollcallService {
    /// Mark how a user attended a meeting, replacing any earlier mark.
    pub async fn record_attendance(
        &self,
        meeting_uuid: &Uuid,
        user_uuid: &Uuid,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<attendance::Model> {
        self.get_meeting(meeting_uuid).await?;
        self.find_user(user_uuid).await?;

        let record = AttendanceRepository::upsert(self.conn(), *user_uuid, *meeting_uuid, status, now).await?;
        info!("Recorded {:?} for user {} at meeting {}", status, user_uuid, meeting_uuid);
        Ok(record)
    }

    pub async fn meeting_attendance(&self, meeting_uuid: &Uuid) -> Result<Vec<attendance::Model>> {
        self.get_meeting(meeting_uuid).await?;
        AttendanceRepository::get_for_meeting(self.conn(), meeting_uuid).await
    }

    pub async fn user_attendance(&self, user_uuid: &Uuid) -> Result<Vec<AttendanceEntry>> {
        self.find_user(user_uuid).await?;
        Ok(AttendanceRepository::get_for_user(self.conn(), user_uuid)
            .await?
            .into_iter()
            .map(|(record, meeting)| AttendanceEntry { record, meeting })
            .collect())
    }

    pub async fn delete_attendance(&self, uuid: &Uuid) -> Result<()> {
        let record = AttendanceRepository::get_by_id(self.conn(), uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("Attendance record", uuid))?;
        AttendanceRepository::delete(self.conn(), record).await
    }

    /// How much of their absence allowance a user has used.
    pub async fn absence_summary(&self, user_uuid: &Uuid) -> Result<AbsenceSummary> {
        let user = self.find_user(user_uuid).await?;
        let allowed = match user.role_uuid {
            Some(role_uuid) => RoleRepository::get_by_id(self.conn(), &role_uuid)
                .await?
                .map(|role| role.allowed_absences),
            None => None,
        }
        .unwrap_or(self.rules().default_allowed_absences);

        let records = AttendanceRepository::get_for_user(self.conn(), user_uuid).await?;
        Ok(AbsenceSummary::compute(allowed, records.into_iter().map(|(record, _)| record.status)))
    }

    /// Absence summaries for every user.
    pub async fn attendance_report(&self) -> Result<Vec<UserAbsenceReport>> {
        let users = UserRepository::get_all_with_roles(self.conn()).await?;

        let mut statuses: HashMap<Uuid, Vec<AttendanceStatus>> = HashMap::new();
        for record in AttendanceRepository::get_all(self.conn()).await? {
            statuses.entry(record.user_uuid).or_default().push(record.status);
        }

        Ok(users
            .into_iter()
            .map(|(user, role)| {
                let allowed = role
                    .as_ref()
                    .map(|r| r.allowed_absences)
                    .unwrap_or(self.rules().default_allowed_absences);
                let summary = AbsenceSummary::compute(allowed, statuses.remove(&user.uuid).unwrap_or_default());
                UserAbsenceReport {
                    user_id: user.uuid,
                    full_name: user.full_name,
                    email: user.email,
                    role: role.map(|r| r.name),
                    attendance: format_percentage(summary.attendance_rate),
                    summary,
                }
            })
            .collect())
    }
}
