//! The device owner's own profile ("my profile").
//!
//! At most one profile exists per device; the store owns it and hands out
//! snapshots.

use serde::{Deserialize, Serialize};

use super::contact::{compose_full_name, Location};

/// The owner's card, shared through the same export and QR paths as contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Single title, unlike contacts which carry a list.
    #[serde(default)]
    pub job_title: String,

    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub locations: Vec<Location>,
}

impl UserProfile {
    #[must_use]
    pub fn full_name(&self) -> String {
        compose_full_name(&self.first_name, &self.last_name)
    }

    /// The job title as a list, empty when unset.
    #[must_use]
    pub fn job_titles(&self) -> Vec<String> {
        if self.job_title.trim().is_empty() {
            Vec::new()
        } else {
            vec![self.job_title.clone()]
        }
    }
}
