//! Common read-only view over contacts and the profile.
//!
//! CSV and text output render both record types through this trait so the
//! column and label order lives in one place per format.

use crate::model::contact::{primary_location, secondary_locations};
use crate::model::{Contact, Location, UserProfile};

pub(crate) trait RecordView {
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn full_name(&self) -> String;
    fn job_titles(&self) -> Vec<&str>;
    fn phone(&self) -> Option<&str>;
    fn email(&self) -> Option<&str>;
    fn notes(&self) -> Option<&str>;
    fn is_favorite(&self) -> bool;
    fn locations(&self) -> &[Location];

    fn primary_location(&self) -> Option<&Location> {
        primary_location(self.locations())
    }

    fn secondary_locations(&self) -> Vec<&Location> {
        secondary_locations(self.locations())
    }
}

impl RecordView for Contact {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn full_name(&self) -> String {
        Contact::full_name(self)
    }

    fn job_titles(&self) -> Vec<&str> {
        self.job_titles.iter().map(String::as_str).collect()
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }
}

impl RecordView for UserProfile {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn full_name(&self) -> String {
        UserProfile::full_name(self)
    }

    fn job_titles(&self) -> Vec<&str> {
        if self.job_title.trim().is_empty() {
            Vec::new()
        } else {
            vec![self.job_title.as_str()]
        }
    }

    // Profile fields are plain strings; blank means "not filled in".
    fn phone(&self) -> Option<&str> {
        non_blank(&self.phone_number)
    }

    fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    fn notes(&self) -> Option<&str> {
        None
    }

    fn is_favorite(&self) -> bool {
        false
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// "Yes"/"No" rendering shared by CSV and text output.
pub(crate) const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
