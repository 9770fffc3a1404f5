//! Excuse request repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{excuse_request, RequestStatus};
use crate::error::Result;

/// Repository for excuse request database operations.
pub struct RequestRepository;

impl RequestRepository {
    /// Get all requests, newest first.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<excuse_request::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(excuse_request::Entity::find()
            .order_by_desc(excuse_request::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get requests in a given status, oldest first so reviewers work in order.
    pub async fn get_with_status<C>(conn: &C, status: RequestStatus) -> Result<Vec<excuse_request::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(excuse_request::Entity::find()
            .filter(excuse_request::Column::Status.eq(status))
            .order_by_asc(excuse_request::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get a user's requests, newest first.
    pub async fn get_for_user<C>(conn: &C, user_uuid: &Uuid) -> Result<Vec<excuse_request::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(excuse_request::Entity::find()
            .filter(excuse_request::Column::UserUuid.eq(*user_uuid))
            .order_by_desc(excuse_request::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get a user's pending request for a meeting, if any.
    pub async fn get_pending_for_meeting<C>(
        conn: &C,
        user_uuid: &Uuid,
        meeting_uuid: &Uuid,
    ) -> Result<Option<excuse_request::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(excuse_request::Entity::find()
            .filter(excuse_request::Column::UserUuid.eq(*user_uuid))
            .filter(excuse_request::Column::MeetingUuid.eq(*meeting_uuid))
            .filter(excuse_request::Column::Status.eq(RequestStatus::Pending))
            .one(conn)
            .await?)
    }

    /// Get a single request by UUID.
    pub async fn get_by_id<C>(conn: &C, uuid: &Uuid) -> Result<Option<excuse_request::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(excuse_request::Entity::find_by_id(*uuid).one(conn).await?)
    }

    pub async fn insert<C>(conn: &C, request: excuse_request::ActiveModel) -> Result<excuse_request::Model>
    where
        C: ConnectionTrait,
    {
        Ok(request.insert(conn).await?)
    }

    /// Update a request in the database.
    pub async fn update<C>(conn: &C, request: excuse_request::ActiveModel) -> Result<excuse_request::Model>
    where
        C: ConnectionTrait,
    {
        Ok(request.update(conn).await?)
    }

    /// Delete a request from the database.
    pub async fn delete<C>(conn: &C, request: excuse_request::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        request.delete(conn).await?;
        Ok(())
    }
}
