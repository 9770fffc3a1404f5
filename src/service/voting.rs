use chrono::{DateTime, Utc};
use log::info;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{required, RollcallService};
use crate::entities::{vote, voting_event, VoteChoice};
use crate::error::{Result, RollcallError};
use crate::repositories::VotingRepository;
use crate::rules::{select_active, VoteTally};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventArgs {
    pub title: String,
    pub description: Option<String>,
}

/// A voting event in a listing, flagged when it is the one open for votes.
#[derive(Clone, Debug, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: voting_event::Model,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct EventResults {
    pub event: voting_event::Model,
    pub tally: VoteTally,
    pub passed: bool,
}

impl RollcallService {
    /// Create an event. It becomes the active event immediately.
    pub async fn create_event(&self, args: CreateEventArgs, now: DateTime<Utc>) -> Result<voting_event::Model> {
        let title = required("title", &args.title)?;

        let event = VotingRepository::insert_event(
            self.conn(),
            voting_event::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                title: ActiveValue::Set(title),
                description: ActiveValue::Set(args.description.filter(|d| !d.trim().is_empty())),
                is_deleted: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
            },
        )
        .await?;
        info!("Voting event '{}' opened", event.title);
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<EventSummary>> {
        let events = VotingRepository::get_live_events(self.conn()).await?;
        let active = select_active(&events).map(|event| event.uuid);
        Ok(events
            .into_iter()
            .map(|event| EventSummary {
                is_active: Some(event.uuid) == active,
                event,
            })
            .collect())
    }

    /// Soft-delete an event. The previous live event, if any, becomes active.
    pub async fn delete_event(&self, uuid: &Uuid) -> Result<()> {
        let event = self.find_live_event(uuid).await?;
        let mut active_model: voting_event::ActiveModel = event.into();
        active_model.is_deleted = ActiveValue::Set(true);
        VotingRepository::update_event(self.conn(), active_model).await?;
        info!("Voting event {} deleted", uuid);
        Ok(())
    }

    pub async fn active_event(&self) -> Result<Option<voting_event::Model>> {
        VotingRepository::get_active(self.conn()).await
    }

    /// Vote on the active event. Voting again replaces the earlier choice.
    pub async fn cast_vote(
        &self,
        event_uuid: &Uuid,
        user_uuid: &Uuid,
        choice: VoteChoice,
        now: DateTime<Utc>,
    ) -> Result<vote::Model> {
        self.find_live_event(event_uuid).await?;
        self.find_user(user_uuid).await?;

        let active = self.active_event().await?;
        if active.map(|event| event.uuid) != Some(*event_uuid) {
            return Err(RollcallError::Conflict(format!(
                "voting event {} is no longer accepting votes",
                event_uuid
            )));
        }

        VotingRepository::upsert_vote(self.conn(), *event_uuid, *user_uuid, choice, now).await
    }

    pub async fn event_results(&self, event_uuid: &Uuid) -> Result<EventResults> {
        let event = self.find_live_event(event_uuid).await?;
        let votes = VotingRepository::get_votes(self.conn(), event_uuid).await?;
        let tally = VoteTally::from_choices(votes.into_iter().map(|v| v.choice));
        Ok(EventResults {
            passed: tally.passed(),
            event,
            tally,
        })
    }

    pub async fn user_vote(&self, event_uuid: &Uuid, user_uuid: &Uuid) -> Result<Option<vote::Model>> {
        VotingRepository::get_vote_for_user(self.conn(), event_uuid, user_uuid).await
    }

    async fn find_live_event(&self, uuid: &Uuid) -> Result<voting_event::Model> {
        VotingRepository::get_event(self.conn(), uuid)
            .await?
            .filter(|event| !event.is_deleted)
            .ok_or_else(|| RollcallError::not_found("Voting event", uuid))
    }
}
