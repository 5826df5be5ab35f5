// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! High-level session/profile façade over the Supabase client.
//!
//! Handles:
//! - Registration (with eager blank-profile creation), login, logout
//! - Session checks with transparent refresh near expiry
//! - Profile lookup and two-step picture-then-row updates
//!
//! Every operation is a pass-through to the hosted service; failures are
//! logged once here and re-signaled unchanged to the caller.

use crate::config::Config;
use crate::error::{PortalError, Result};
use crate::models::{AuthData, AuthUser, Profile, Session};
use crate::services::names;
use crate::services::supabase::SupabaseClient;
use crate::store::SessionStore;
use chrono::{Duration, Utc};

/// Margin before session expiry when we proactively refresh (5 minutes).
const SESSION_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Session and profile operations for the member portal.
pub struct PortalService {
    client: SupabaseClient,
    store: SessionStore,
}

impl PortalService {
    /// Create a service for the configured Supabase project.
    pub fn new(config: &Config) -> Self {
        Self {
            client: SupabaseClient::new(
                config.supabase_url.clone(),
                config.supabase_anon_key.clone(),
            ),
            store: SessionStore::open(config.session_file.clone()),
        }
    }

    /// Assemble a service from explicit parts (used by tests to wire in the
    /// offline mock client).
    pub fn with_parts(client: SupabaseClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    // ─── Auth operations ─────────────────────────────────────────

    /// Create a new identity and its blank profile row.
    ///
    /// Confirmation flows return a user with no session; when a session is
    /// issued it is persisted immediately.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthData> {
        let response = match self.client.sign_up(email, password).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, email, "Registration failed");
                return Err(e);
            }
        };

        let data = response.into_auth_data();

        // New identities start with an empty profile row so later updates
        // are plain PATCHes.
        if let Some(user) = &data.user {
            let token = data.session.as_ref().map(|s| s.access_token.as_str());
            let blank = Profile::blank(&user.id);
            if let Err(e) = self
                .client
                .insert_row(token, names::PROFILES_TABLE, &blank)
                .await
            {
                tracing::error!(error = %e, user_id = %user.id, "Blank profile insert failed");
                return Err(e);
            }
        }

        if let Some(session) = &data.session {
            self.store.set(session.clone()).await?;
        }

        tracing::info!(
            email,
            session_issued = data.session.is_some(),
            "User registered"
        );
        Ok(data)
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData> {
        let response = match self.client.sign_in_with_password(email, password).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, email, "Login failed");
                return Err(e);
            }
        };

        let data = response.into_auth_data();
        if let Some(session) = &data.session {
            self.store.set(session.clone()).await?;
        }

        tracing::info!(email, "User logged in");
        Ok(data)
    }

    /// Invalidate the current session server-side, then drop it locally.
    ///
    /// Without a stored session this is a local no-op. The store is left
    /// untouched when the service cannot invalidate the session.
    pub async fn logout(&self) -> Result<()> {
        let Some(session) = self.store.get().await else {
            return self.store.clear().await;
        };

        if let Err(e) = self.client.sign_out(&session.access_token).await {
            tracing::error!(error = %e, "Logout failed");
            return Err(e);
        }

        self.store.clear().await?;
        tracing::info!("User logged out");
        Ok(())
    }

    /// Current session, or `None` when the user is signed out.
    ///
    /// Never errors for "no session": an absent token and a rejected refresh
    /// token both yield `None`. Only a true transport/service failure is an
    /// error. A session within the refresh margin of expiry is refreshed
    /// transparently before being returned.
    pub async fn check_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.store.get().await else {
            return Ok(None);
        };

        let fresh = match session.expiry() {
            Some(expiry) => Utc::now() + Duration::seconds(SESSION_REFRESH_MARGIN_SECS) < expiry,
            // No recorded expiry; the store stamps one on write, so trust it
            None => true,
        };
        if fresh {
            return Ok(Some(session));
        }

        tracing::debug!(user_id = %session.user.id, "Session near expiry, refreshing");
        match self.client.refresh_session(&session.refresh_token).await {
            Ok(response) => match response.into_auth_data().session {
                Some(new_session) => {
                    self.store.set(new_session.clone()).await?;
                    Ok(Some(new_session))
                }
                None => {
                    self.store.clear().await?;
                    Ok(None)
                }
            },
            Err(e) if e.is_stale_session() => {
                tracing::warn!(error = %e, "Refresh token rejected, clearing session");
                self.store.clear().await?;
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Session refresh failed");
                Err(e)
            }
        }
    }

    /// Identity of the currently signed-in user.
    pub async fn current_user(&self) -> Result<AuthUser> {
        let session = self
            .check_session()
            .await?
            .ok_or_else(|| PortalError::Auth("No active session".to_string()))?;

        match self.client.get_user(&session.access_token).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::error!(error = %e, "Fetching current user failed");
                Err(e)
            }
        }
    }

    // ─── Profile operations ──────────────────────────────────────

    /// Fetch the single profile row for an identity id.
    pub async fn get_profile(&self, profile_id: &str) -> Result<Profile> {
        let token = self.store.get().await.map(|s| s.access_token);

        let mut rows: Vec<Profile> = match self
            .client
            .select_by_id(token.as_deref(), names::PROFILES_TABLE, profile_id)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, profile_id, "Profile lookup failed");
                return Err(e);
            }
        };

        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => {
                let e = PortalError::NotFound(format!("No profile row for {}", profile_id));
                tracing::error!(error = %e, profile_id, "Profile lookup failed");
                Err(e)
            }
            n => {
                let e = PortalError::NotFound(format!(
                    "Expected one profile row for {}, found {}",
                    profile_id, n
                ));
                tracing::error!(error = %e, profile_id, "Profile lookup failed");
                Err(e)
            }
        }
    }

    /// Apply a partial profile update, uploading a new picture first when
    /// one is supplied.
    ///
    /// Null attributes mean "no change" and are dropped from the payload.
    /// When the upload fails the row is never touched; the stored object
    /// path only reaches the row after a successful upload.
    pub async fn update_profile(
        &self,
        profile: &Profile,
        picture: Option<&[u8]>,
    ) -> Result<Vec<Profile>> {
        let Some(id) = profile.id.clone() else {
            let e = PortalError::Internal(anyhow::anyhow!("Profile update requires an id"));
            tracing::error!(error = %e, "Profile update rejected");
            return Err(e);
        };

        let token = self.store.get().await.map(|s| s.access_token);
        let mut payload = profile.update_payload();

        if let Some(bytes) = picture {
            let path = match self
                .client
                .upload_object(
                    token.as_deref(),
                    names::PROFILE_PICTURES_BUCKET,
                    &id,
                    bytes.to_vec(),
                )
                .await
            {
                Ok(path) => path,
                Err(e) => {
                    tracing::error!(error = %e, profile_id = %id, "Profile picture upload failed");
                    return Err(e);
                }
            };
            payload.insert(
                "profile_picture".to_string(),
                serde_json::Value::String(path),
            );
        }

        let rows = match self
            .client
            .update_by_id(token.as_deref(), names::PROFILES_TABLE, &id, &payload)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, profile_id = %id, "Profile update failed");
                return Err(e);
            }
        };

        tracing::info!(profile_id = %id, fields = payload.len(), "Profile updated");
        Ok(rows)
    }
}
