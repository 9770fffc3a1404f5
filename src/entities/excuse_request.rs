//! Excuse requests a member files ahead of (or after) a meeting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "excuse_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub meeting_uuid: Uuid,
    pub reason: String,
    pub status: RequestStatus,
    /// Set at submission time when the meeting was too close
    pub is_late: bool,
    pub reviewer_uuid: Option<Uuid>,
    pub reviewer_note: Option<String>,
    pub created_at: DateTimeUtc,
    pub reviewed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserUuid",
        to = "super::user::Column::Uuid",
        on_delete = "Cascade",
        fk_name = "fk-excuse_requests-user"
    )]
    User,
    /// Cleared when the reviewing user is deleted
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewerUuid",
        to = "super::user::Column::Uuid",
        on_delete = "SetNull",
        fk_name = "fk-excuse_requests-reviewer"
    )]
    Reviewer,
    #[sea_orm(
        belongs_to = "super::meeting::Entity",
        from = "Column::MeetingUuid",
        to = "super::meeting::Column::Uuid",
        on_delete = "Cascade"
    )]
    Meeting,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::meeting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meeting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
