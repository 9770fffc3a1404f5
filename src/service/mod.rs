//! Application service for Rollcall.
//!
//! [`RollcallService`] is the layer between the HTTP handlers and the
//! repositories. It validates input, applies the attendance and voting rules
//! from [`crate::rules`], and decides which database writes belong in one
//! transaction. Operations are split by area:
//! - [`users`] and [`roles`] for membership
//! - [`meetings`] and [`attendance`] for meetings and who showed up
//! - [`requests`] for excuse requests and their review
//! - [`voting`] for voting events and votes

pub mod attendance;
pub mod meetings;
pub mod requests;
pub mod roles;
pub mod users;
pub mod voting;

use sea_orm::DatabaseConnection;

use crate::config::{AuthConfig, Config, RulesConfig};
use crate::error::{Result, RollcallError};
use crate::storage::Database;

pub use attendance::{AttendanceEntry, UserAbsenceReport};
pub use meetings::{CreateMeetingArgs, UpdateMeetingArgs};
pub use requests::ReviewDecision;
pub use roles::{CreateRoleArgs, UpdateRoleArgs};
pub use users::{UpdateUserArgs, UserProfile};
pub use voting::{CreateEventArgs, EventResults, EventSummary};

/// Business operations over the Rollcall database.
///
/// Cloning is cheap; the connection pool is shared.
#[derive(Clone)]
pub struct RollcallService {
    database: Database,
    rules: RulesConfig,
    auth: AuthConfig,
}

impl RollcallService {
    pub fn new(database: Database, config: &Config) -> Self {
        Self {
            database,
            rules: config.rules.clone(),
            auth: config.auth.clone(),
        }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.database.conn
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}

/// Trimmed `value`, or a validation error naming `field` when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RollcallError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
