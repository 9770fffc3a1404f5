use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{CurrentUser, JsonBody, UrlPath};
use super::state::AppState;
use crate::entities::{attendance, meeting, AttendanceStatus};
use crate::error::Result;
use crate::service::{CreateMeetingArgs, UpdateMeetingArgs, UserAbsenceReport};

#[derive(Deserialize)]
pub struct RecordAttendanceBody {
    pub user_id: Uuid,
    pub status: AttendanceStatus,
}

pub async fn list_meetings(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<Vec<meeting::Model>>> {
    Ok(Json(state.service.list_meetings().await?))
}

pub async fn upcoming_meetings(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<meeting::Model>>> {
    Ok(Json(state.service.upcoming_meetings(Utc::now()).await?))
}

pub async fn create_meeting(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(args): JsonBody<CreateMeetingArgs>,
) -> Result<(StatusCode, Json<meeting::Model>)> {
    user.require_admin()?;
    Ok((StatusCode::CREATED, Json(state.service.create_meeting(args).await?)))
}

pub async fn get_meeting(
    State(state): State<AppState>,
    _user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<meeting::Model>> {
    Ok(Json(state.service.get_meeting(&id).await?))
}

pub async fn update_meeting(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(args): JsonBody<UpdateMeetingArgs>,
) -> Result<Json<meeting::Model>> {
    user.require_admin()?;
    Ok(Json(state.service.update_meeting(&id, args).await?))
}

pub async fn delete_meeting(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    user.require_admin()?;
    state.service.delete_meeting(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn meeting_attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<Vec<attendance::Model>>> {
    user.require_admin()?;
    Ok(Json(state.service.meeting_attendance(&id).await?))
}

pub async fn record_attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(body): JsonBody<RecordAttendanceBody>,
) -> Result<Json<attendance::Model>> {
    user.require_admin()?;
    let record = state
        .service
        .record_attendance(&id, &body.user_id, body.status, Utc::now())
        .await?;
    Ok(Json(record))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    user.require_admin()?;
    state.service.delete_attendance(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attendance_report(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<UserAbsenceReport>>> {
    user.require_admin()?;
    Ok(Json(state.service.attendance_report().await?))
}
