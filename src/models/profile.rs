//! Profile model for the `profiles` table.

use serde::{Deserialize, Serialize};

/// Extended member record, distinct from the bare auth identity.
///
/// One row per user, keyed by the auth identity id (1:1). Every attribute is
/// an optional string; `None` means "no change" and is excluded from update
/// payloads, so omitted fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Storage object path, written after a successful upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_salutation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies_and_interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_sports: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_music_genres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_shows_and_movies: Option<String>,
}

impl Profile {
    /// Blank row inserted for a freshly registered identity: every attribute
    /// present but empty, so later updates are plain PATCHes.
    pub fn blank(id: &str) -> Self {
        let empty = || Some(String::new());
        Self {
            id: Some(id.to_string()),
            salutation: empty(),
            first_name: empty(),
            last_name: empty(),
            email: empty(),
            profile_picture: empty(),
            home_address: empty(),
            country: empty(),
            date_of_birth: empty(),
            gender: empty(),
            marital_status: empty(),
            spouse_salutation: empty(),
            spouse_first_name: empty(),
            spouse_last_name: empty(),
            hobbies_and_interests: empty(),
            favorite_sports: empty(),
            preferred_music_genres: empty(),
            preferred_shows_and_movies: empty(),
        }
    }

    /// Partial-update payload: the set attributes only, nulls dropped.
    pub fn update_payload(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct of optional strings always serializes to an object
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_attributes_are_absent_from_payload() {
        let profile = Profile {
            id: Some("user-1".to_string()),
            first_name: Some("Ada".to_string()),
            country: Some("SG".to_string()),
            ..Default::default()
        };

        let payload = profile.update_payload();

        assert_eq!(payload.len(), 3);
        assert_eq!(payload["id"], "user-1");
        assert_eq!(payload["first_name"], "Ada");
        assert_eq!(payload["country"], "SG");
        assert!(!payload.contains_key("last_name"));
        assert!(!payload.contains_key("profile_picture"));
    }

    #[test]
    fn payload_filtering_is_idempotent() {
        let profile = Profile {
            id: Some("user-1".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        };

        let once = profile.update_payload();
        let twice: Profile = serde_json::from_value(serde_json::Value::Object(once.clone()))
            .expect("payload should deserialize back");

        assert_eq!(once, twice.update_payload());
    }

    #[test]
    fn blank_row_has_every_attribute_empty() {
        let row = Profile::blank("user-1");
        let payload = row.update_payload();

        // id plus the 17 profile attributes
        assert_eq!(payload.len(), 18);
        assert_eq!(payload["id"], "user-1");
        for (key, value) in payload.iter().filter(|(k, _)| *k != "id") {
            assert_eq!(value, "", "attribute {key} should start empty");
        }
    }

    #[test]
    fn empty_string_is_a_real_value_not_a_null() {
        // Clearing a field is an explicit empty string; only None is "no change"
        let profile = Profile {
            id: Some("user-1".to_string()),
            home_address: Some(String::new()),
            ..Default::default()
        };

        let payload = profile.update_payload();
        assert_eq!(payload["home_address"], "");
    }
}
