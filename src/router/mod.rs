// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side route table and per-navigation authentication gating.

pub mod guard;

pub use guard::{decide, GuardDecision, RouteGuard};

/// A named route with its authentication requirement.
///
/// The guard is agnostic to everything about a route except the
/// `requires_auth` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub path: String,
    pub requires_auth: bool,
}

impl Route {
    pub fn new(name: &str, path: &str, requires_auth: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            requires_auth,
        }
    }
}

/// The navigable routes plus the two redirect targets the guard hands back.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: String,
    profile_path: String,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, login_path: &str, profile_path: &str) -> Self {
        Self {
            routes,
            login_path: login_path.to_string(),
            profile_path: profile_path.to_string(),
        }
    }

    /// Look up a route by name.
    pub fn find(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Where unauthenticated users are bounced to.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Where already-authenticated users are bounced to.
    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }
}

impl Default for RouteTable {
    /// The portal's web routes.
    fn default() -> Self {
        Self::new(
            vec![
                Route::new("home", "/home", true),
                Route::new("login", "/login", false),
                Route::new("profile", "/profile", true),
                Route::new("register", "/register", false),
            ],
            "/login",
            "/profile?section=basic",
        )
    }
}
