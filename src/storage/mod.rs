//! Database connection and schema management
//!
//! This module owns the SeaORM connection and creates the tables for:
//! - Roles and users
//! - Meetings and attendance records
//! - Excuse requests
//! - Voting events and votes

pub mod db;

pub use db::Database;
