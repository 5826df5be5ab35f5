// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase REST client.
//!
//! One method per capability the portal consumes:
//! - GoTrue auth (sign-up, password grant, token refresh, sign-out, get-user)
//! - PostgREST table select / insert / update by id
//! - Storage object upload
//!
//! The client is stateless: session tokens are passed per call, and the anon
//! key stands in as the bearer for unauthenticated requests, matching what
//! the hosted service expects.

use crate::error::PortalError;
use crate::models::{AuthResponse, AuthUser};
use serde::Deserialize;

/// Supabase REST client.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Option<String>,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a client for a Supabase project.
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Some(base_url.trim_end_matches('/').to_string()),
            anon_key,
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// Every operation fails with its capability's error kind.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            anon_key: "mock-anon-key".to_string(),
        }
    }

    /// Helper to get the base URL or the offline-mode error for a capability.
    fn base_url(&self, offline: fn(String) -> PortalError) -> Result<&str, PortalError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| offline("Backend not configured (offline mode)".to_string()))
    }

    fn bearer<'a>(&'a self, access_token: Option<&'a str>) -> &'a str {
        access_token.unwrap_or(&self.anon_key)
    }

    // ─── Auth (GoTrue) ───────────────────────────────────────────

    /// Create a new identity.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, PortalError> {
        let base = self.base_url(PortalError::Auth)?;
        let url = format!("{}/auth/v1/signup", base);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| PortalError::Auth(e.to_string()))?;

        Self::check_response_json(response, PortalError::Auth).await
    }

    /// Exchange credentials for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, PortalError> {
        let base = self.base_url(PortalError::Auth)?;
        let url = format!("{}/auth/v1/token?grant_type=password", base);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| PortalError::Auth(e.to_string()))?;

        Self::check_response_json(response, PortalError::Auth).await
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> Result<AuthResponse, PortalError> {
        let base = self.base_url(PortalError::Auth)?;
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", base);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| PortalError::Auth(e.to_string()))?;

        Self::check_response_json(response, PortalError::Auth).await
    }

    /// Invalidate the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), PortalError> {
        let base = self.base_url(PortalError::Auth)?;
        let url = format!("{}/auth/v1/logout", base);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PortalError::Auth(e.to_string()))?;

        Self::check_response(response, PortalError::Auth).await
    }

    /// Fetch the identity behind an access token.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, PortalError> {
        let base = self.base_url(PortalError::Auth)?;
        let url = format!("{}/auth/v1/user", base);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PortalError::Auth(e.to_string()))?;

        Self::check_response_json(response, PortalError::Auth).await
    }

    // ─── Tables (PostgREST) ──────────────────────────────────────

    /// Select all rows matching an id.
    pub async fn select_by_id<T: for<'de> Deserialize<'de>>(
        &self,
        access_token: Option<&str>,
        table: &str,
        id: &str,
    ) -> Result<Vec<T>, PortalError> {
        let base = self.base_url(PortalError::Database)?;
        let url = format!("{}/rest/v1/{}", base, table);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer(access_token))
            .query(&[("id", format!("eq.{}", id)), ("select", "*".to_string())])
            .send()
            .await
            .map_err(|e| PortalError::Database(e.to_string()))?;

        Self::check_response_json(response, PortalError::Database).await
    }

    /// Insert a row.
    pub async fn insert_row<T: serde::Serialize>(
        &self,
        access_token: Option<&str>,
        table: &str,
        row: &T,
    ) -> Result<(), PortalError> {
        let base = self.base_url(PortalError::Database)?;
        let url = format!("{}/rest/v1/{}", base, table);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer(access_token))
            .json(row)
            .send()
            .await
            .map_err(|e| PortalError::Database(e.to_string()))?;

        Self::check_response(response, PortalError::Database).await
    }

    /// Apply a partial attribute mapping to the rows matching an id and
    /// return the updated rows.
    pub async fn update_by_id<T: for<'de> Deserialize<'de>>(
        &self,
        access_token: Option<&str>,
        table: &str,
        id: &str,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<T>, PortalError> {
        let base = self.base_url(PortalError::Database)?;
        let url = format!("{}/rest/v1/{}", base, table);

        let response = self
            .http
            .patch(&url)
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer(access_token))
            .query(&[("id", format!("eq.{}", id))])
            .json(payload)
            .send()
            .await
            .map_err(|e| PortalError::Database(e.to_string()))?;

        Self::check_response_json(response, PortalError::Database).await
    }

    // ─── Storage ─────────────────────────────────────────────────

    /// Upload a binary object and return its stored path.
    ///
    /// Uploads overwrite: the portal keys pictures by profile id, so a
    /// second upload for the same member replaces the first.
    pub async fn upload_object(
        &self,
        access_token: Option<&str>,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<String, PortalError> {
        let base = self.base_url(PortalError::Storage)?;
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            base,
            bucket,
            urlencoding::encode(key)
        );

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .bearer_auth(self.bearer(access_token))
            .body(bytes)
            .send()
            .await
            .map_err(|e| PortalError::Storage(e.to_string()))?;

        let uploaded: UploadedObject =
            Self::check_response_json(response, PortalError::Storage).await?;
        Ok(uploaded.key)
    }

    // ─── Response helpers ────────────────────────────────────────

    /// Check response status and return the capability's error if not
    /// successful.
    async fn check_response(
        response: reqwest::Response,
        kind: fn(String) -> PortalError,
    ) -> Result<(), PortalError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(kind(format!("HTTP {}: {}", status, body)))
    }

    /// Check response and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
        kind: fn(String) -> PortalError,
    ) -> Result<T, PortalError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(kind(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| kind(format!("JSON parse error: {}", e)))
    }
}

/// Storage upload response.
#[derive(Debug, Deserialize)]
struct UploadedObject {
    #[serde(rename = "Key")]
    key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    #[tokio::test]
    async fn mock_client_fails_with_capability_kinds() {
        let client = SupabaseClient::new_mock();

        assert!(matches!(
            client.sign_in_with_password("a@x.com", "secret1").await,
            Err(PortalError::Auth(_))
        ));
        assert!(matches!(
            client
                .select_by_id::<Profile>(None, "profiles", "user-1")
                .await,
            Err(PortalError::Database(_))
        ));
        assert!(matches!(
            client
                .upload_object(None, "profile-pictures", "user-1", vec![1, 2, 3])
                .await,
            Err(PortalError::Storage(_))
        ));
    }
}
