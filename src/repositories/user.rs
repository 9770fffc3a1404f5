//! User repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{role, user};
use crate::error::Result;

/// Repository for user-related database operations.
pub struct UserRepository;

impl UserRepository {
    /// Get all users together with their role.
    pub async fn get_all_with_roles<C>(conn: &C) -> Result<Vec<(user::Model, Option<role::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .find_also_related(role::Entity)
            .order_by_asc(user::Column::FullName)
            .order_by_asc(user::Column::Email)
            .all(conn)
            .await?)
    }

    /// Get a single user by UUID.
    pub async fn get_by_id<C>(conn: &C, uuid: &Uuid) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(*uuid).one(conn).await?)
    }

    /// Get a single user by identity-provider subject.
    pub async fn get_by_auth_id<C>(conn: &C, auth_id: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find().filter(user::Column::AuthId.eq(auth_id)).one(conn).await?)
    }

    pub async fn get_by_email<C>(conn: &C, email: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find().filter(user::Column::Email.eq(email)).one(conn).await?)
    }

    /// Count users holding a role.
    pub async fn count_with_role<C>(conn: &C, role_uuid: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        use sea_orm::PaginatorTrait;
        Ok(user::Entity::find()
            .filter(user::Column::RoleUuid.eq(*role_uuid))
            .count(conn)
            .await?)
    }

    pub async fn insert<C>(conn: &C, user: user::ActiveModel) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        Ok(user.insert(conn).await?)
    }

    /// Update a user in the database.
    pub async fn update<C>(conn: &C, user: user::ActiveModel) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        Ok(user.update(conn).await?)
    }

    /// Delete a user along with their attendance, requests and votes.
    pub async fn delete<C>(conn: &C, user: user::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        user.delete(conn).await?;
        Ok(())
    }
}
