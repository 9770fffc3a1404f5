//! Request extractors.
//!
//! Besides the caller extractors, this wraps axum's `Json`, `Path` and
//! `Query` so malformed input is rejected as [`RollcallError::Validation`]
//! with the usual JSON error body.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::state::AppState;
use crate::auth::{extract_bearer_token, Identity};
use crate::error::{Result, RollcallError};
use crate::service::UserProfile;

/// A caller whose token checked out, registered or not.
pub struct Authenticated(pub Identity);

/// A caller with a registered user account.
pub struct CurrentUser(pub UserProfile);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = RollcallError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| RollcallError::Unauthorized("missing or invalid bearer token".to_string()))?;
        let identity = state.identity.verify(token).await?;
        Ok(Self(identity))
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = RollcallError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Authenticated(identity) = Authenticated::from_request_parts(parts, state).await?;
        state
            .service
            .get_user_by_auth_id(&identity.subject)
            .await?
            .map(Self)
            .ok_or_else(|| RollcallError::Unauthorized("user is not registered; sync the account first".to_string()))
    }
}

impl CurrentUser {
    pub fn uuid(&self) -> Uuid {
        self.0.user.uuid
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.0.is_admin() {
            Ok(())
        } else {
            Err(RollcallError::Forbidden("administrator role required".to_string()))
        }
    }

    pub fn require_self_or_admin(&self, user_uuid: &Uuid) -> Result<()> {
        if self.uuid() == *user_uuid {
            return Ok(());
        }
        self.require_admin()
    }
}

/// JSON request body.
pub struct JsonBody<T>(pub T);

/// Path parameters.
pub struct UrlPath<T>(pub T);

/// Query string parameters.
pub struct UrlQuery<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RollcallError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for UrlPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RollcallError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for UrlQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RollcallError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
