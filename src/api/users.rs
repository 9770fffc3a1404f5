use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::extract::{Authenticated, CurrentUser, JsonBody, UrlPath};
use super::state::AppState;
use crate::entities::{excuse_request, role};
use crate::error::Result;
use crate::rules::AbsenceSummary;
use crate::service::{AttendanceEntry, CreateRoleArgs, UpdateRoleArgs, UpdateUserArgs, UserProfile};

#[derive(Deserialize)]
pub struct SyncUserBody {
    pub email: String,
    pub full_name: String,
}

pub async fn sync_user(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    JsonBody(body): JsonBody<SyncUserBody>,
) -> Result<Json<UserProfile>> {
    let profile = state.service.sync_user(&identity, &body.email, &body.full_name).await?;
    Ok(Json(profile))
}

pub async fn me(user: CurrentUser) -> Json<UserProfile> {
    Json(user.0)
}

pub async fn my_absences(State(state): State<AppState>, user: CurrentUser) -> Result<Json<AbsenceSummary>> {
    Ok(Json(state.service.absence_summary(&user.uuid()).await?))
}

pub async fn my_requests(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<excuse_request::Model>>> {
    Ok(Json(state.service.user_requests(&user.uuid()).await?))
}

pub async fn list_users(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<UserProfile>>> {
    user.require_admin()?;
    Ok(Json(state.service.list_users().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<UserProfile>> {
    user.require_self_or_admin(&id)?;
    Ok(Json(state.service.get_user(&id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(args): JsonBody<UpdateUserArgs>,
) -> Result<Json<UserProfile>> {
    user.require_admin()?;
    Ok(Json(state.service.update_user(&id, args).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    user.require_admin()?;
    state.service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_absences(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<AbsenceSummary>> {
    user.require_self_or_admin(&id)?;
    Ok(Json(state.service.absence_summary(&id).await?))
}

pub async fn user_attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<Vec<AttendanceEntry>>> {
    user.require_self_or_admin(&id)?;
    Ok(Json(state.service.user_attendance(&id).await?))
}

pub async fn list_roles(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<Vec<role::Model>>> {
    Ok(Json(state.service.list_roles().await?))
}

pub async fn create_role(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(args): JsonBody<CreateRoleArgs>,
) -> Result<(StatusCode, Json<role::Model>)> {
    user.require_admin()?;
    Ok((StatusCode::CREATED, Json(state.service.create_role(args).await?)))
}

pub async fn update_role(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(args): JsonBody<UpdateRoleArgs>,
) -> Result<Json<role::Model>> {
    user.require_admin()?;
    Ok(Json(state.service.update_role(&id, args).await?))
}

pub async fn delete_role(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    user.require_admin()?;
    state.service.delete_role(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
