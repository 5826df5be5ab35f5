// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Member portal client: session, profile, and route gating over a hosted
//! Supabase backend.
//!
//! This crate wraps the Supabase REST surface (GoTrue auth, PostgREST
//! tables, Storage objects) behind a small façade for registration, login,
//! session checks, and profile CRUD, and provides the per-navigation
//! authentication guard the web frontend consumes.

pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{PortalError, Result};
pub use router::{GuardDecision, Route, RouteGuard, RouteTable};
pub use services::PortalService;
