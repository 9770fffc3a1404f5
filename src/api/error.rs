use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;

use crate::error::RollcallError;

impl RollcallError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RollcallError::NotFound(_) => StatusCode::NOT_FOUND,
            RollcallError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RollcallError::Forbidden(_) => StatusCode::FORBIDDEN,
            RollcallError::Conflict(_) => StatusCode::CONFLICT,
            RollcallError::Validation(_) => StatusCode::BAD_REQUEST,
            RollcallError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RollcallError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures are logged in full and hidden from clients
        let message = if status.is_server_error() {
            error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for RollcallError {
    fn from(rejection: JsonRejection) -> Self {
        RollcallError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for RollcallError {
    fn from(rejection: PathRejection) -> Self {
        RollcallError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RollcallError {
    fn from(rejection: QueryRejection) -> Self {
        RollcallError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RollcallError::not_found("User", 1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RollcallError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RollcallError::Database(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    async fn body_of(err: RollcallError) -> (StatusCode, serde_json::Value) {
        use http_body_util::BodyExt;

        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_database_errors_are_hidden() {
        let (status, body) = body_of(RollcallError::Database(sea_orm::DbErr::Custom("secret table".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let (status, body) = body_of(RollcallError::Conflict("role 'member' already exists".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict: role 'member' already exists");
    }
}
