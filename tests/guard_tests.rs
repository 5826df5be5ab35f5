// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard tests against the portal service.
//!
//! These run fully offline: session presence is driven through the
//! persisted store, and no decision path needs the network as long as the
//! stored session is nowhere near expiry.

use member_portal::{GuardDecision, RouteGuard, RouteTable};

mod common;

#[tokio::test]
async fn auth_route_without_session_redirects_to_login() {
    common::clear_session_file("guard-login");
    let portal = common::offline_portal("guard-login");
    let guard = RouteGuard::new(&portal, RouteTable::default());

    let home = guard.table().find("home").cloned().unwrap();
    let decision = guard.evaluate(&home).await.unwrap();

    assert_eq!(decision, GuardDecision::RedirectToLogin);
    assert_eq!(
        guard.redirect_for(&home).await.unwrap().as_deref(),
        Some("/login")
    );
}

#[tokio::test]
async fn public_route_with_session_redirects_to_profile() {
    common::seed_session("guard-profile", common::test_session(3600)).await;
    let portal = common::offline_portal("guard-profile");
    let guard = RouteGuard::new(&portal, RouteTable::default());

    let login = guard.table().find("login").cloned().unwrap();
    let decision = guard.evaluate(&login).await.unwrap();

    assert_eq!(decision, GuardDecision::RedirectToProfile);
    assert_eq!(
        guard.redirect_for(&login).await.unwrap().as_deref(),
        Some("/profile?section=basic")
    );
}

#[tokio::test]
async fn auth_route_with_session_allows() {
    common::seed_session("guard-allow", common::test_session(3600)).await;
    let portal = common::offline_portal("guard-allow");
    let guard = RouteGuard::new(&portal, RouteTable::default());

    let profile = guard.table().find("profile").cloned().unwrap();
    assert_eq!(
        guard.evaluate(&profile).await.unwrap(),
        GuardDecision::Allow
    );
    assert!(guard.redirect_for(&profile).await.unwrap().is_none());
}

#[tokio::test]
async fn public_route_without_session_allows() {
    common::clear_session_file("guard-public");
    let portal = common::offline_portal("guard-public");
    let guard = RouteGuard::new(&portal, RouteTable::default());

    let register = guard.table().find("register").cloned().unwrap();
    assert_eq!(
        guard.evaluate(&register).await.unwrap(),
        GuardDecision::Allow
    );
}

#[tokio::test]
async fn consecutive_session_checks_agree() {
    // With a session present
    common::seed_session("guard-agree", common::test_session(3600)).await;
    let portal = common::offline_portal("guard-agree");
    let first = portal.check_session().await.unwrap().is_some();
    let second = portal.check_session().await.unwrap().is_some();
    assert!(first && second);

    // And with none
    common::clear_session_file("guard-agree-none");
    let portal = common::offline_portal("guard-agree-none");
    let first = portal.check_session().await.unwrap().is_some();
    let second = portal.check_session().await.unwrap().is_some();
    assert!(!first && !second);
}
