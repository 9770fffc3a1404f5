use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extract::{CurrentUser, JsonBody, UrlPath};
use super::state::AppState;
use crate::entities::{vote, voting_event, VoteChoice};
use crate::error::Result;
use crate::service::{CreateEventArgs, EventResults, EventSummary};

#[derive(Deserialize)]
pub struct CastVoteBody {
    pub choice: VoteChoice,
}

/// What clients poll to keep their voting panel current
#[derive(Serialize)]
pub struct ActiveEventResponse {
    pub event: Option<voting_event::Model>,
    pub my_vote: Option<VoteChoice>,
    pub poll_interval_seconds: u64,
}

pub async fn list_events(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<Vec<EventSummary>>> {
    Ok(Json(state.service.list_events().await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(args): JsonBody<CreateEventArgs>,
) -> Result<(StatusCode, Json<voting_event::Model>)> {
    user.require_admin()?;
    Ok((StatusCode::CREATED, Json(state.service.create_event(args, Utc::now()).await?)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<StatusCode> {
    user.require_admin()?;
    state.service.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn active_event(State(state): State<AppState>, user: CurrentUser) -> Result<Json<ActiveEventResponse>> {
    let event = state.service.active_event().await?;
    let my_vote = match &event {
        Some(event) => state
            .service
            .user_vote(&event.uuid, &user.uuid())
            .await?
            .map(|v| v.choice),
        None => None,
    };

    Ok(Json(ActiveEventResponse {
        event,
        my_vote,
        poll_interval_seconds: state.service.rules().poll_interval_seconds,
    }))
}

pub async fn cast_vote(
    State(state): State<AppState>,
    user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
    JsonBody(body): JsonBody<CastVoteBody>,
) -> Result<Json<vote::Model>> {
    let vote = state
        .service
        .cast_vote(&id, &user.uuid(), body.choice, Utc::now())
        .await?;
    Ok(Json(vote))
}

pub async fn event_results(
    State(state): State<AppState>,
    _user: CurrentUser,
    UrlPath(id): UrlPath<Uuid>,
) -> Result<Json<EventResults>> {
    Ok(Json(state.service.event_results(&id).await?))
}
