// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with a uniform propagation policy.
//!
//! Every operation logs its failure once at the boundary where it occurred
//! and then re-signals the same error to the caller. Nothing is retried and
//! no error is fatal to the process.

/// Application error type, one variant per failure signal of the external
/// service surface.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    /// True when an auth failure means the persisted session is simply no
    /// longer valid (rejected refresh token) rather than a transport or
    /// service outage. GoTrue rejects stale refresh tokens with 400/401
    /// bodies carrying `invalid_grant`.
    pub fn is_stale_session(&self) -> bool {
        match self {
            PortalError::Auth(msg) => {
                msg.contains("invalid_grant")
                    || msg.contains("refresh_token_not_found")
                    || msg.starts_with("HTTP 400")
                    || msg.starts_with("HTTP 401")
            }
            _ => false,
        }
    }
}

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;
