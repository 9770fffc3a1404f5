//! Error types shared by the repository, service and API layers.

/// Errors produced by Rollcall operations.
///
/// Each variant maps to one HTTP status in the API layer, so service code
/// picks the variant by what the caller did wrong rather than by where the
/// failure happened.
#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[source] sea_orm::DbErr),
}

impl RollcallError {
    pub fn not_found(what: impl std::fmt::Display, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {}", what, id))
    }
}

/// Unique-index violations become conflicts.
impl From<sea_orm::DbErr> for RollcallError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                Self::Conflict(format!("duplicate value ({})", detail))
            }
            _ => Self::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RollcallError>;
