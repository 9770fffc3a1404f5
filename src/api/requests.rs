use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{CurrentUser, JsonBody, UrlPath, UrlQuery};
use super::state::AppState;
use crate::entities::{excuse_request, RequestStatus};
use crate::error::Result;
use crate::service::ReviewDecision;

#[derive(Deserialize)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
}

#[derive(Deserialize)]
pub struct SubmitRequestBody {
    pub meeting_id: Uuid,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct ReviewBody {
    pub decision: ReviewDecision,
    pub note: Option<String>,
}

pub async fn list_requests(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlQuery(filter): UrlQuery<RequestFilter>,
) -> Result<Json<Vec<excuse_request::Model>>> {
    user.require_admin()?;
    Ok(Json(state.service.list_requests(filter.status).await?))
}

pub async fn submit_request(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(body): JsonBody<SubmitRequestBody>,
) -> Result<(StatusCode, Json<excuse_request::Model>)> {
    let request = state
        .service
        .submit_request(&user.uuid(), &body.meeting_id, &body.reason, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn get_request(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<excuse_request::Model>> {
    let request = state.service.get_request(&id).await?;
    user.require_self_or_admin(&request.user_uuid)?;
    Ok(Json(request))
}

pub async fn review_request(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(body): JsonBody<ReviewBody>,
) -> Result<Json<excuse_request::Model>> {
    user.require_admin()?;
    let request = state
        .service
        .review_request(&id, &user.uuid(), body.decision, body.note, Utc::now())
        .await?;
    Ok(Json(request))
}

pub async fn withdraw_request(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    state.service.withdraw_request(&id, &user.uuid()).await?;
    Ok(StatusCode::NO_CONTENT)
}
