// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the client layer over the hosted backend.

pub mod portal;
pub mod supabase;

pub use portal::PortalService;
pub use supabase::SupabaseClient;

/// Backend object names as constants.
pub mod names {
    /// Table holding the extended member records (keyed by identity id)
    pub const PROFILES_TABLE: &str = "profiles";
    /// Storage bucket for profile pictures (keyed by profile id)
    pub const PROFILE_PICTURES_BUCKET: &str = "profile-pictures";
}
