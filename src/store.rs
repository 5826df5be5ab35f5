// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted session store.
//!
//! The Rust counterpart of the browser-local storage a web client keeps its
//! session in: one JSON file holding the current session. The store is the
//! only owner of that file; everything else reads the session through the
//! portal service, never the file directly.

use crate::error::Result;
use crate::models::Session;
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// File-backed holder of the current session token.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store, loading any previously persisted session.
    pub fn open(path: PathBuf) -> Self {
        let current = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Discarding unreadable session file"
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    /// Current session, if any.
    pub async fn get(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Persist a session, stamping an absolute expiry if the server omitted
    /// one.
    pub async fn set(&self, mut session: Session) -> Result<()> {
        if session.expires_at.is_none() {
            session.expires_at = Some(Utc::now().timestamp() + session.expires_in);
        }

        let bytes = serde_json::to_vec_pretty(&session)
            .context("Failed to serialize session")?;
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Drop the session and remove its file.
    pub async fn clear(&self) -> Result<()> {
        *self.current.write().await = None;

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            )
            .into()),
        }
    }
}
