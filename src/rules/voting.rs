//! Voting event selection and vote counting.

use serde::Serialize;

use crate::entities::{voting_event, VoteChoice};

/// Vote counts for one event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub total: u32,
}

impl VoteTally {
    pub fn from_choices<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = VoteChoice>,
    {
        let mut tally = Self::default();
        for choice in choices {
            match choice {
                VoteChoice::Yes => tally.yes += 1,
                VoteChoice::No => tally.no += 1,
                VoteChoice::Abstain => tally.abstain += 1,
            }
            tally.total += 1;
        }
        tally
    }

    /// Yes beats no; abstentions don't count either way.
    pub fn passed(&self) -> bool {
        self.yes > self.no
    }
}

/// The active event is the newest one that hasn't been deleted. Events
/// created at the same instant are ordered by uuid, highest first, which
/// matches the repository query.
pub fn select_active(events: &[voting_event::Model]) -> Option<&voting_event::Model> {
    events
        .iter()
        .filter(|event| !event.is_deleted)
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.uuid.cmp(&b.uuid)))
}
