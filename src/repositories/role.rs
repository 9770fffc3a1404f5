//! Role repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::role;
use crate::error::Result;

/// Repository for role-related database operations.
pub struct RoleRepository;

impl RoleRepository {
    /// Get all roles ordered by name.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<role::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(role::Entity::find().order_by_asc(role::Column::Name).all(conn).await?)
    }

    /// Get a single role by UUID.
    pub async fn get_by_id<C>(conn: &C, uuid: &Uuid) -> Result<Option<role::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(role::Entity::find_by_id(*uuid).one(conn).await?)
    }

    /// Get a single role by its unique name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> Result<Option<role::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(role::Entity::find().filter(role::Column::Name.eq(name)).one(conn).await?)
    }

    pub async fn insert<C>(conn: &C, role: role::ActiveModel) -> Result<role::Model>
    where
        C: ConnectionTrait,
    {
        Ok(role.insert(conn).await?)
    }

    /// Update a role in the database.
    pub async fn update<C>(conn: &C, role: role::ActiveModel) -> Result<role::Model>
    where
        C: ConnectionTrait,
    {
        Ok(role.update(conn).await?)
    }

    /// Delete a role. Users holding it are left without a role.
    pub async fn delete<C>(conn: &C, role: role::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        role.delete(conn).await?;
        Ok(())
    }
}
