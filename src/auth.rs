//! Identity verification.
//!
//! Sign-in itself happens at an external identity provider; requests reach
//! Rollcall with a bearer token that an [`IdentityProvider`] turns into an
//! [`Identity`]. The provider is a trait so deployments can plug in whatever
//! verifies their tokens. [`StaticTokenProvider`] covers configured tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{Result, RollcallError};

/// A verified caller as seen by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable subject id, stored as `users.auth_id`
    pub subject: String,
}

/// Turns bearer tokens into identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity>;
}

/// Accepts a fixed set of tokens from configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenProvider {
    tokens: HashMap<String, String>,
}

impl StaticTokenProvider {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.tokens.clone())
    }

    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), subject.into());
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn verify(&self, token: &str) -> Result<Identity> {
        self.tokens
            .get(token)
            .map(|subject| Identity {
                subject: subject.clone(),
            })
            .ok_or_else(|| RollcallError::Unauthorized("unknown token".to_string()))
    }
}

/// Extract the bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
