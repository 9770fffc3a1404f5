use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    /// Subject assigned by the identity provider
    #[sea_orm(unique)]
    pub auth_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub role_uuid: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleUuid",
        to = "super::role::Column::Uuid",
        on_delete = "SetNull"
    )]
    Role,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::excuse_request::Entity")]
    ExcuseRequests,
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::excuse_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExcuseRequests.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
