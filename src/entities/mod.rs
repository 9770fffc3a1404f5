//! SeaORM entity models for the Rollcall database tables.

pub mod attendance;
pub mod excuse_request;
pub mod meeting;
pub mod role;
pub mod user;
pub mod vote;
pub mod voting_event;

pub use attendance::{AttendanceStatus, Entity as Attendance};
pub use excuse_request::{Entity as ExcuseRequest, RequestStatus};
pub use meeting::Entity as Meeting;
pub use role::Entity as Role;
pub use user::Entity as User;
pub use vote::{Entity as Vote, VoteChoice};
pub use voting_event::Entity as VotingEvent;
