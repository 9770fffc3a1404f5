//! Business rules for attendance, excuse requests and voting.
//!
//! Everything here is a pure function of its inputs so the service layer
//! can load rows, call in, and persist whatever comes back.

pub mod absence;
pub mod lateness;
pub mod voting;

pub use absence::{format_percentage, AbsenceSummary};
pub use lateness::{hours_until, is_late_request};
pub use voting::{select_active, VoteTally};
