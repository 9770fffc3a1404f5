use chrono::{DateTime, Utc};
use log::info;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{required, RollcallService};
use crate::entities::meeting;
use crate::error::{Result, RollcallError};
use crate::repositories::MeetingRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingArgs {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default = "default_mandatory")]
    pub is_mandatory: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetingArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub is_mandatory: Option<bool>,
}

fn default_mandatory() -> bool {
    true
}

/// Blank descriptions are stored as no description
fn normalize_description(description: Option<String>) -> Option<String> {
    description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

impl RollcallService {
    pub async fn create_meeting(&self, args: CreateMeetingArgs) -> Result<meeting::Model> {
        let title = required("title", &args.title)?;

        let meeting = MeetingRepository::insert(
            self.conn(),
            meeting::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                title: ActiveValue::Set(title),
                description: ActiveValue::Set(normalize_description(args.description)),
                starts_at: ActiveValue::Set(args.starts_at),
                is_mandatory: ActiveValue::Set(args.is_mandatory),
                created_at: ActiveValue::Set(Utc::now()),
            },
        )
        .await?;
        info!("Created meeting '{}' at {}", meeting.title, meeting.starts_at);
        Ok(meeting)
    }

    pub async fn list_meetings(&self) -> Result<Vec<meeting::Model>> {
        MeetingRepository::get_all(self.conn()).await
    }

    pub async fn upcoming_meetings(&self, now: DateTime<Utc>) -> Result<Vec<meeting::Model>> {
        MeetingRepository::get_upcoming(self.conn(), now).await
    }

    pub async fn get_meeting(&self, uuid: &Uuid) -> Result<meeting::Model> {
        MeetingRepository::get_by_id(self.conn(), uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("Meeting", uuid))
    }

    pub async fn update_meeting(&self, uuid: &Uuid, args: UpdateMeetingArgs) -> Result<meeting::Model> {
        let meeting = self.get_meeting(uuid).await?;
        let mut active_model: meeting::ActiveModel = meeting.into();

        if let Some(title) = args.title {
            active_model.title = ActiveValue::Set(required("title", &title)?);
        }
        if args.description.is_some() {
            active_model.description = ActiveValue::Set(normalize_description(args.description));
        }
        if let Some(starts_at) = args.starts_at {
            active_model.starts_at = ActiveValue::Set(starts_at);
        }
        if let Some(is_mandatory) = args.is_mandatory {
            active_model.is_mandatory = ActiveValue::Set(is_mandatory);
        }

        MeetingRepository::update(self.conn(), active_model).await
    }

    pub async fn delete_meeting(&self, uuid: &Uuid) -> Result<()> {
        let meeting = self.get_meeting(uuid).await?;
        MeetingRepository::delete(self.conn(), meeting).await?;
        info!("Deleted meeting {}", uuid);
        Ok(())
    }
}
