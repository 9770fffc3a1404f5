//! Meeting repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::meeting;
use crate::error::Result;

/// Repository for meeting-related database operations.
pub struct MeetingRepository;

impl MeetingRepository {
    /// Get all meetings, most recent first.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<meeting::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(meeting::Entity::find()
            .order_by_desc(meeting::Column::StartsAt)
            .all(conn)
            .await?)
    }

    /// Get meetings starting at or after `now`, soonest first.
    pub async fn get_upcoming<C>(conn: &C, now: DateTime<Utc>) -> Result<Vec<meeting::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(meeting::Entity::find()
            .filter(meeting::Column::StartsAt.gte(now))
            .order_by_asc(meeting::Column::StartsAt)
            .all(conn)
            .await?)
    }

    /// Get a single meeting by UUID.
    pub async fn get_by_id<C>(conn: &C, uuid: &Uuid) -> Result<Option<meeting::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(meeting::Entity::find_by_id(*uuid).one(conn).await?)
    }

    pub async fn insert<C>(conn: &C, meeting: meeting::ActiveModel) -> Result<meeting::Model>
    where
        C: ConnectionTrait,
    {
        Ok(meeting.insert(conn).await?)
    }

    /// Update a meeting in the database.
    pub async fn update<C>(conn: &C, meeting: meeting::ActiveModel) -> Result<meeting::Model>
    where
        C: ConnectionTrait,
    {
        Ok(meeting.update(conn).await?)
    }

    /// Delete a meeting and everything recorded against it.
    pub async fn delete<C>(conn: &C, meeting: meeting::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        meeting.delete(conn).await?;
        Ok(())
    }
}
