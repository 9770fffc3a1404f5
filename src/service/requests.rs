use chrono::{DateTime, Utc};
use log::{info, warn};
use sea_orm::{ActiveValue, TransactionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{required, RollcallService};
use crate::entities::{excuse_request, AttendanceStatus, RequestStatus};
use crate::error::{Result, RollcallError};
use crate::repositories::{AttendanceRepository, RequestRepository};
use crate::rules::is_late_request;

/// What a reviewer decided about a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl RollcallService {
    /// File an excuse request for a meeting. Requests filed too close to
    /// the meeting are accepted but flagged late.
    pub async fn submit_request(
        &self,
        user_uuid: &Uuid,
        meeting_uuid: &Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<excuse_request::Model> {
        let reason = required("reason", reason)?;
        self.find_user(user_uuid).await?;
        let meeting = self.get_meeting(meeting_uuid).await?;

        if RequestRepository::get_pending_for_meeting(self.conn(), user_uuid, meeting_uuid)
            .await?
            .is_some()
        {
            return Err(RollcallError::Conflict(
                "a pending request for this meeting already exists".to_string(),
            ));
        }

        let is_late = is_late_request(now, meeting.starts_at, self.rules().late_request_hours);
        let request = RequestRepository::insert(
            self.conn(),
            excuse_request::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                user_uuid: ActiveValue::Set(*user_uuid),
                meeting_uuid: ActiveValue::Set(*meeting_uuid),
                reason: ActiveValue::Set(reason),
                status: ActiveValue::Set(RequestStatus::Pending),
                is_late: ActiveValue::Set(is_late),
                reviewer_uuid: ActiveValue::Set(None),
                reviewer_note: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                reviewed_at: ActiveValue::Set(None),
            },
        )
        .await?;

        if is_late {
            warn!("Late excuse request {} for meeting {}", request.uuid, meeting_uuid);
        } else {
            info!("Excuse request {} filed for meeting {}", request.uuid, meeting_uuid);
        }
        Ok(request)
    }

    /// All requests, or only those in `status`.
    pub async fn list_requests(&self, status: Option<RequestStatus>) -> Result<Vec<excuse_request::Model>> {
        match status {
            Some(status) => RequestRepository::get_with_status(self.conn(), status).await,
            None => RequestRepository::get_all(self.conn()).await,
        }
    }

    pub async fn pending_requests(&self) -> Result<Vec<excuse_request::Model>> {
        self.list_requests(Some(RequestStatus::Pending)).await
    }

    pub async fn user_requests(&self, user_uuid: &Uuid) -> Result<Vec<excuse_request::Model>> {
        RequestRepository::get_for_user(self.conn(), user_uuid).await
    }

    pub async fn get_request(&self, uuid: &Uuid) -> Result<excuse_request::Model> {
        RequestRepository::get_by_id(self.conn(), uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("Request", uuid))
    }

    /// Approve or reject a pending request. Approval marks the requester
    /// excused for the meeting.
    pub async fn review_request(
        &self,
        uuid: &Uuid,
        reviewer_uuid: &Uuid,
        decision: ReviewDecision,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<excuse_request::Model> {
        let txn = self.conn().begin().await?;

        let request = RequestRepository::get_by_id(&txn, uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("Request", uuid))?;
        if request.status != RequestStatus::Pending {
            return Err(RollcallError::Conflict(format!("request {} was already reviewed", uuid)));
        }

        let (user_uuid, meeting_uuid) = (request.user_uuid, request.meeting_uuid);
        let status = match decision {
            ReviewDecision::Approve => RequestStatus::Approved,
            ReviewDecision::Reject => RequestStatus::Rejected,
        };

        let mut active_model: excuse_request::ActiveModel = request.into();
        active_model.status = ActiveValue::Set(status);
        active_model.reviewer_uuid = ActiveValue::Set(Some(*reviewer_uuid));
        active_model.reviewer_note = ActiveValue::Set(note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()));
        active_model.reviewed_at = ActiveValue::Set(Some(now));
        let request = RequestRepository::update(&txn, active_model).await?;

        if decision == ReviewDecision::Approve {
            AttendanceRepository::upsert(&txn, user_uuid, meeting_uuid, AttendanceStatus::Excused, now).await?;
        }

        txn.commit().await?;
        info!("Request {} {:?} by {}", uuid, status, reviewer_uuid);
        Ok(request)
    }

    /// Let a user take back their own request before it is reviewed.
    pub async fn withdraw_request(&self, uuid: &Uuid, user_uuid: &Uuid) -> Result<()> {
        let request = self.get_request(uuid).await?;
        if request.user_uuid != *user_uuid {
            return Err(RollcallError::Forbidden("only the requester can withdraw a request".to_string()));
        }
        if request.status != RequestStatus::Pending {
            return Err(RollcallError::Conflict(format!("request {} was already reviewed", uuid)));
        }
        RequestRepository::delete(self.conn(), request).await?;
        info!("Request {} withdrawn", uuid);
        Ok(())
    }
}
