//! Attendance repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{attendance, meeting, AttendanceStatus};
use crate::error::Result;

/// Repository for attendance-related database operations.
pub struct AttendanceRepository;

impl AttendanceRepository {
    /// Get every attendance record.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<attendance::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attendance::Entity::find().all(conn).await?)
    }

    /// Get a single record by UUID.
    pub async fn get_by_id<C>(conn: &C, uuid: &Uuid) -> Result<Option<attendance::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attendance::Entity::find_by_id(*uuid).one(conn).await?)
    }

    /// Get the record for one user at one meeting.
    pub async fn get_for_user_and_meeting<C>(
        conn: &C,
        user_uuid: &Uuid,
        meeting_uuid: &Uuid,
    ) -> Result<Option<attendance::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attendance::Entity::find()
            .filter(attendance::Column::UserUuid.eq(*user_uuid))
            .filter(attendance::Column::MeetingUuid.eq(*meeting_uuid))
            .one(conn)
            .await?)
    }

    /// Get all records for a meeting.
    pub async fn get_for_meeting<C>(conn: &C, meeting_uuid: &Uuid) -> Result<Vec<attendance::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attendance::Entity::find()
            .filter(attendance::Column::MeetingUuid.eq(*meeting_uuid))
            .order_by_asc(attendance::Column::RecordedAt)
            .all(conn)
            .await?)
    }

    /// Get all records for a user with their meeting, newest meeting first.
    pub async fn get_for_user<C>(
        conn: &C,
        user_uuid: &Uuid,
    ) -> Result<Vec<(attendance::Model, Option<meeting::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(attendance::Entity::find()
            .filter(attendance::Column::UserUuid.eq(*user_uuid))
            .find_also_related(meeting::Entity)
            .order_by_desc(meeting::Column::StartsAt)
            .all(conn)
            .await?)
    }

    /// Insert the record for a user and meeting, or overwrite its status.
    pub async fn upsert<C>(
        conn: &C,
        user_uuid: Uuid,
        meeting_uuid: Uuid,
        status: AttendanceStatus,
        recorded_at: DateTime<Utc>,
    ) -> Result<attendance::Model>
    where
        C: ConnectionTrait,
    {
        match Self::get_for_user_and_meeting(conn, &user_uuid, &meeting_uuid).await? {
            Some(existing) => {
                let mut active_model: attendance::ActiveModel = existing.into();
                active_model.status = ActiveValue::Set(status);
                active_model.recorded_at = ActiveValue::Set(recorded_at);
                Ok(active_model.update(conn).await?)
            }
            None => Ok(attendance::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                user_uuid: ActiveValue::Set(user_uuid),
                meeting_uuid: ActiveValue::Set(meeting_uuid),
                status: ActiveValue::Set(status),
                recorded_at: ActiveValue::Set(recorded_at),
            }
            .insert(conn)
            .await?),
        }
    }

    /// Delete an attendance record.
    pub async fn delete<C>(conn: &C, record: attendance::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        record.delete(conn).await?;
        Ok(())
    }
}
