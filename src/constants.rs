//! Constants used throughout the application
//!
//! This module centralizes defaults, environment variable names, and
//! user-facing messages.

// Defaults
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://rollcall.db?mode=rwc";
/// Requests filed 24 hours or less before a meeting are late
pub const DEFAULT_LATE_REQUEST_HOURS: i64 = 24;
pub const DEFAULT_ALLOWED_ABSENCES: i32 = 3;
/// Clients refresh the active voting event this often
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;

// Seeded roles
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ADMIN: &str = "admin";

// Environment overrides
pub const ENV_DATABASE_URL: &str = "ROLLCALL_DATABASE_URL";
pub const ENV_PORT: &str = "ROLLCALL_PORT";

// Log file
pub const LOG_DIR_NAME: &str = "rollcall";
pub const LOG_FILE_NAME: &str = "rollcall.log";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOG_SCHEMA_READY: &str = "✅ Database schema ready";
pub const LOG_SERVER_STOPPED: &str = "Server shut down";
