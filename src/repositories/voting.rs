//! Voting event and vote repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{vote, voting_event, VoteChoice};
use crate::error::Result;

/// Repository for voting events and the votes cast on them.
pub struct VotingRepository;

impl VotingRepository {
    /// Get events that haven't been deleted, newest first.
    pub async fn get_live_events<C>(conn: &C) -> Result<Vec<voting_event::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(voting_event::Entity::find()
            .filter(voting_event::Column::IsDeleted.eq(false))
            .order_by_desc(voting_event::Column::CreatedAt)
            .order_by_desc(voting_event::Column::Uuid)
            .all(conn)
            .await?)
    }

    /// Get the active event: the newest one that hasn't been deleted.
    pub async fn get_active<C>(conn: &C) -> Result<Option<voting_event::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(voting_event::Entity::find()
            .filter(voting_event::Column::IsDeleted.eq(false))
            .order_by_desc(voting_event::Column::CreatedAt)
            .order_by_desc(voting_event::Column::Uuid)
            .one(conn)
            .await?)
    }

    /// Get a single event by UUID, deleted or not.
    pub async fn get_event<C>(conn: &C, uuid: &Uuid) -> Result<Option<voting_event::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(voting_event::Entity::find_by_id(*uuid).one(conn).await?)
    }

    pub async fn insert_event<C>(conn: &C, event: voting_event::ActiveModel) -> Result<voting_event::Model>
    where
        C: ConnectionTrait,
    {
        Ok(event.insert(conn).await?)
    }

    /// Update an event in the database.
    pub async fn update_event<C>(conn: &C, event: voting_event::ActiveModel) -> Result<voting_event::Model>
    where
        C: ConnectionTrait,
    {
        Ok(event.update(conn).await?)
    }

    /// Get all votes cast on an event.
    pub async fn get_votes<C>(conn: &C, event_uuid: &Uuid) -> Result<Vec<vote::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(vote::Entity::find()
            .filter(vote::Column::EventUuid.eq(*event_uuid))
            .order_by_asc(vote::Column::CastAt)
            .all(conn)
            .await?)
    }

    /// Get a user's vote on an event.
    pub async fn get_vote_for_user<C>(conn: &C, event_uuid: &Uuid, user_uuid: &Uuid) -> Result<Option<vote::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(vote::Entity::find()
            .filter(vote::Column::EventUuid.eq(*event_uuid))
            .filter(vote::Column::UserUuid.eq(*user_uuid))
            .one(conn)
            .await?)
    }

    /// Record a user's vote, replacing the choice if they already voted.
    pub async fn upsert_vote<C>(
        conn: &C,
        event_uuid: Uuid,
        user_uuid: Uuid,
        choice: VoteChoice,
        cast_at: DateTime<Utc>,
    ) -> Result<vote::Model>
    where
        C: ConnectionTrait,
    {
        match Self::get_vote_for_user(conn, &event_uuid, &user_uuid).await? {
            Some(existing) => {
                let mut active_model: vote::ActiveModel = existing.into();
                active_model.choice = ActiveValue::Set(choice);
                active_model.cast_at = ActiveValue::Set(cast_at);
                Ok(active_model.update(conn).await?)
            }
            None => Ok(vote::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                event_uuid: ActiveValue::Set(event_uuid),
                user_uuid: ActiveValue::Set(user_uuid),
                choice: ActiveValue::Set(choice),
                cast_at: ActiveValue::Set(cast_at),
            }
            .insert(conn)
            .await?),
        }
    }
}
