//! Rollcall - attendance and voting management for student organizations
//!
//! This library provides the HTTP API and business rules behind an
//! organization's meeting attendance, excuse requests, and member votes.
//! Data lives in a SeaORM-managed database; sign-in is delegated to an
//! external identity provider.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`entities`] - SeaORM entity models
//! * [`repositories`] - Database queries
//! * [`rules`] - Absence allowance, late request and voting rules
//! * [`service`] - Business operations used by the API
//! * [`api`] - axum routes and handlers

/// HTTP routes, extractors and server startup
pub mod api;

/// Bearer token verification
pub mod auth;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error type shared across layers
pub mod error;

/// Logging setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Pure business rules
pub mod rules;

/// Business operations over the database
pub mod service;

/// Database connection and schema
pub mod storage;

pub use error::{Result, RollcallError};
