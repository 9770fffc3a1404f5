use log::info;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectOptions, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Schema,
};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::constants::{LOG_SCHEMA_READY, ROLE_ADMIN, ROLE_MEMBER};
use crate::entities::{attendance, excuse_request, meeting, role, user, vote, voting_event};
use crate::error::Result;

/// Handle to the Rollcall database
#[derive(Clone)]
pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Connect using the configured URL and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options.max_connections(config.max_connections).sqlx_logging(false);

        // Every connection to `sqlite::memory:` would otherwise get its own empty database
        if config.url.contains(":memory:") || config.url.contains("mode=memory") {
            options.min_connections(1).max_connections(1);
        }

        let conn = sea_orm::Database::connect(options).await?;
        let database = Self { conn };
        database.init_schema().await?;
        Ok(database)
    }

    /// Fresh in-memory SQLite database, used by tests
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
    }

    /// Create tables and indexes that don't exist yet
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first
        let mut tables = vec![
            schema.create_table_from_entity(role::Entity),
            schema.create_table_from_entity(user::Entity),
            schema.create_table_from_entity(meeting::Entity),
            schema.create_table_from_entity(attendance::Entity),
            schema.create_table_from_entity(excuse_request::Entity),
            schema.create_table_from_entity(voting_event::Entity),
            schema.create_table_from_entity(vote::Entity),
        ];
        for table in tables.iter_mut() {
            table.if_not_exists();
            self.conn.execute(backend.build(&*table)).await?;
        }

        let indexes: Vec<IndexCreateStatement> = vec![
            Index::create()
                .name("idx_attendance_user_meeting")
                .table(attendance::Entity)
                .col(attendance::Column::UserUuid)
                .col(attendance::Column::MeetingUuid)
                .unique()
                .if_not_exists()
                .to_owned(),
            Index::create()
                .name("idx_votes_event_user")
                .table(vote::Entity)
                .col(vote::Column::EventUuid)
                .col(vote::Column::UserUuid)
                .unique()
                .if_not_exists()
                .to_owned(),
        ];
        for index in &indexes {
            self.conn.execute(backend.build(index)).await?;
        }

        info!("{}", LOG_SCHEMA_READY);
        Ok(())
    }

    /// Make sure the `member` and `admin` roles exist
    pub async fn seed_roles(&self, default_allowed_absences: i32) -> Result<()> {
        for (name, is_admin) in [(ROLE_MEMBER, false), (ROLE_ADMIN, true)] {
            let existing = role::Entity::find()
                .filter(role::Column::Name.eq(name))
                .one(&self.conn)
                .await?;
            if existing.is_some() {
                continue;
            }

            role::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                name: ActiveValue::Set(name.to_string()),
                allowed_absences: ActiveValue::Set(default_allowed_absences),
                is_admin: ActiveValue::Set(is_admin),
                created_at: ActiveValue::Set(chrono::Utc::now()),
            }
            .insert(&self.conn)
            .await?;
            info!("Seeded role '{}'", name);
        }
        Ok(())
    }

    /// Check if any user has been registered
    pub async fn has_users(&self) -> Result<bool> {
        Ok(user::Entity::find().one(&self.conn).await?.is_some())
    }
}
