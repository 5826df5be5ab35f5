// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use member_portal::models::{AuthUser, Session};
use member_portal::services::{PortalService, SupabaseClient};
use member_portal::store::SessionStore;
use std::path::PathBuf;

/// Check if a live Supabase project is configured via environment variables.
#[allow(dead_code)]
pub fn backend_available() -> bool {
    std::env::var("SUPABASE_URL").is_ok() && std::env::var("SUPABASE_ANON_KEY").is_ok()
}

/// Skip test with message if no live backend is configured.
#[macro_export]
macro_rules! require_backend {
    () => {
        if !crate::common::backend_available() {
            eprintln!("⚠️  Skipping: SUPABASE_URL / SUPABASE_ANON_KEY not set");
            return;
        }
    };
}

/// Unique session file under the system temp dir, one per test.
#[allow(dead_code)]
pub fn temp_session_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("portal-session-{}-{}.json", tag, std::process::id()))
}

/// Portal service wired to the offline mock client (no network).
#[allow(dead_code)]
pub fn offline_portal(tag: &str) -> PortalService {
    let store = SessionStore::open(temp_session_file(tag));
    PortalService::with_parts(SupabaseClient::new_mock(), store)
}

/// Portal service against the live configured backend.
#[allow(dead_code)]
pub fn live_portal(tag: &str) -> PortalService {
    let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL not set");
    let key = std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY not set");
    let store = SessionStore::open(temp_session_file(tag));
    PortalService::with_parts(SupabaseClient::new(url, key), store)
}

/// Persist a session fixture so a portal opened on the same tag loads it.
#[allow(dead_code)]
pub async fn seed_session(tag: &str, session: Session) {
    let store = SessionStore::open(temp_session_file(tag));
    store.set(session).await.expect("Failed to seed session");
}

/// Remove any persisted session for a tag.
#[allow(dead_code)]
pub fn clear_session_file(tag: &str) {
    let _ = std::fs::remove_file(temp_session_file(tag));
}

/// Session fixture expiring the given number of seconds from now.
#[allow(dead_code)]
pub fn test_session(expires_in_secs: i64) -> Session {
    Session {
        access_token: "test-access-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: expires_in_secs,
        expires_at: Some(chrono::Utc::now().timestamp() + expires_in_secs),
        refresh_token: "test-refresh-token".to_string(),
        user: AuthUser {
            id: "test-user".to_string(),
            email: Some("a@x.com".to_string()),
            created_at: None,
            last_sign_in_at: None,
        },
    }
}
