// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-navigation authorization decision point.
//!
//! The decision itself is a pure function over (route flag, session
//! presence); the navigation side effect belongs to the thin caller that
//! applies the returned redirect. No state persists between evaluations, so
//! every navigation re-queries the live session.

use crate::error::Result;
use crate::router::{Route, RouteTable};
use crate::services::PortalService;

/// Decision states for a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the target route unchanged
    Allow,
    /// Authentication required but no session exists
    RedirectToLogin,
    /// Already authenticated; bounce away from login/register
    RedirectToProfile,
}

impl GuardDecision {
    /// Redirect path for the caller to navigate to, if the decision demands
    /// one.
    pub fn target<'a>(&self, table: &'a RouteTable) -> Option<&'a str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(table.login_path()),
            GuardDecision::RedirectToProfile => Some(table.profile_path()),
        }
    }
}

/// Pure transition rule, evaluated per navigation request.
pub fn decide(requires_auth: bool, session_present: bool) -> GuardDecision {
    if requires_auth && !session_present {
        GuardDecision::RedirectToLogin
    } else if !requires_auth && session_present {
        GuardDecision::RedirectToProfile
    } else {
        GuardDecision::Allow
    }
}

/// Navigation interceptor over the session/profile client.
pub struct RouteGuard<'a> {
    portal: &'a PortalService,
    table: RouteTable,
}

impl<'a> RouteGuard<'a> {
    pub fn new(portal: &'a PortalService, table: RouteTable) -> Self {
        Self { portal, table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Evaluate the transition rule for a target route against the live
    /// session.
    pub async fn evaluate(&self, route: &Route) -> Result<GuardDecision> {
        let session = self.portal.check_session().await?;
        let decision = decide(route.requires_auth, session.is_some());
        tracing::debug!(
            route = %route.name,
            requires_auth = route.requires_auth,
            session_present = session.is_some(),
            ?decision,
            "Route guard evaluated"
        );
        Ok(decision)
    }

    /// Evaluate a route and resolve the redirect path the caller should
    /// apply, if any.
    pub async fn redirect_for(&self, route: &Route) -> Result<Option<String>> {
        let decision = self.evaluate(route).await?;
        Ok(decision.target(&self.table).map(String::from))
    }
}
