//! Session and auth identity models (GoTrue wire shapes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-issued proof of an authenticated identity.
///
/// Created on successful login or sign-up, destroyed on logout or expiry,
/// refreshed transparently by the client when it nears expiry. The route
/// guard only ever consumes presence/absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds at issue time
    pub expires_in: i64,
    /// Absolute expiry (Unix seconds). GoTrue usually includes it; the
    /// session store stamps it from `expires_in` when absent.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: AuthUser,
}

impl Session {
    /// Absolute expiry instant, if one is recorded.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expires_at.and_then(|t| DateTime::from_timestamp(t, 0))
    }
}

/// Bare auth identity as returned by GoTrue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<String>,
}

/// Raw response body of the GoTrue sign-up / token endpoints.
///
/// Password and refresh grants return the session fields at the top level
/// with the user embedded. Sign-up under an email-confirmation flow returns
/// the bare identity instead, with no token fields.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    // Bare-identity shape (confirmation flows)
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthResponse {
    /// Normalize either wire shape into a (user, session) pair.
    pub fn into_auth_data(self) -> AuthData {
        let user = self.user.clone().or_else(|| {
            self.id.as_ref().map(|id| AuthUser {
                id: id.clone(),
                email: self.email.clone(),
                created_at: None,
                last_sign_in_at: None,
            })
        });

        let session = match (self.access_token, self.refresh_token, &user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Some(Session {
                access_token,
                token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
                expires_in: self.expires_in.unwrap_or(0),
                expires_at: self.expires_at,
                refresh_token,
                user: user.clone(),
            }),
            _ => None,
        };

        AuthData { user, session }
    }
}

/// Normalized result of a sign-up or sign-in handed to callers.
#[derive(Debug, Clone)]
pub struct AuthData {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
}
