//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Every method is generic over `ConnectionTrait`, so the same call works on
//! the shared connection or inside a transaction.

pub mod attendance;
pub mod meeting;
pub mod request;
pub mod role;
pub mod user;
pub mod voting;

pub use attendance::AttendanceRepository;
pub use meeting::MeetingRepository;
pub use request::RequestRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
pub use voting::VotingRepository;
