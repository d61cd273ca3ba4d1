//! Contact and location records.
//!
//! A contact's locations are an ordered list in which at most one entry is
//! flagged primary. When none is flagged, the first location stands in as
//! primary at read time; the stored flags are never rewritten.

use serde::{Deserialize, Serialize};

/// Separator used whenever several job titles are rendered as one string.
pub const JOB_TITLE_SEPARATOR: &str = "; ";

/// A place a contact (or the profile owner) is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique within the owning record, never reassigned.
    pub id: String,

    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub is_primary: bool,

    #[serde(default)]
    pub is_local_resident: bool,

    #[serde(default)]
    pub has_vehicle: bool,

    #[serde(default)]
    pub is_housed: bool,
}

impl Location {
    /// Create a non-primary location with every attribute unset.
    pub fn new(country: impl Into<String>, region: Option<String>) -> Self {
        Self {
            id: new_record_id(),
            country: country.into(),
            region,
            is_primary: false,
            is_local_resident: false,
            has_vehicle: false,
            is_housed: false,
        }
    }

    /// "Country (Region)", or just the country when no region is set.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.region.as_deref().filter(|r| !r.trim().is_empty()) {
            Some(region) => format!("{} ({region})", self.country),
            None => self.country.clone(),
        }
    }
}

/// An address book entry.
///
/// Optional text fields use `None` for "never set"; an empty string is a
/// value the user actually saved and is exported as such.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ContactRepr")]
pub struct Contact {
    /// Stable identifier assigned by the store.
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// Ordered as entered; never re-sorted for display.
    pub job_titles: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub is_favorite: bool,

    pub locations: Vec<Location>,
}

/// Wire shape accepted when reading contacts back in.
///
/// Older exports carry a single `jobTitle` string instead of `jobTitles`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactRepr {
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    job_titles: Option<Vec<String>>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default)]
    locations: Vec<Location>,
}

impl From<ContactRepr> for Contact {
    fn from(repr: ContactRepr) -> Self {
        Self {
            id: repr.id,
            first_name: repr.first_name,
            last_name: repr.last_name,
            job_titles: normalize_job_titles(repr.job_titles, repr.job_title),
            phone: repr.phone,
            email: repr.email,
            notes: repr.notes,
            is_favorite: repr.is_favorite,
            locations: repr.locations,
        }
    }
}

impl Contact {
    /// Create a contact with a generated ID and no optional fields.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            job_titles: Vec::new(),
            phone: None,
            email: None,
            notes: None,
            is_favorite: false,
            locations: Vec::new(),
        }
    }

    /// Display name: "first last", trimmed, empty parts collapsed.
    #[must_use]
    pub fn full_name(&self) -> String {
        compose_full_name(&self.first_name, &self.last_name)
    }

    /// Job titles joined with [`JOB_TITLE_SEPARATOR`].
    #[must_use]
    pub fn job_summary(&self) -> String {
        self.job_titles.join(JOB_TITLE_SEPARATOR)
    }

    /// Flagged primary location, falling back to the first one.
    #[must_use]
    pub fn primary_location(&self) -> Option<&Location> {
        primary_location(&self.locations)
    }

    /// Every location except the effective primary, in stored order.
    #[must_use]
    pub fn secondary_locations(&self) -> Vec<&Location> {
        secondary_locations(&self.locations)
    }
}

/// Join first and last name, dropping blank parts.
#[must_use]
pub fn compose_full_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Index of the effective primary location.
#[must_use]
pub fn primary_index(locations: &[Location]) -> Option<usize> {
    if locations.is_empty() {
        return None;
    }
    Some(locations.iter().position(|l| l.is_primary).unwrap_or(0))
}

/// Effective primary location of a location list.
#[must_use]
pub fn primary_location(locations: &[Location]) -> Option<&Location> {
    primary_index(locations).map(|i| &locations[i])
}

/// Locations other than the effective primary.
#[must_use]
pub fn secondary_locations(locations: &[Location]) -> Vec<&Location> {
    let primary = primary_index(locations);
    locations
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != primary)
        .map(|(_, l)| l)
        .collect()
}

/// Merge the list form and the legacy single-title form into one list.
pub(crate) fn normalize_job_titles(list: Option<Vec<String>>, single: Option<String>) -> Vec<String> {
    match (list, single) {
        (Some(list), _) => list,
        (None, Some(single)) if !single.trim().is_empty() => vec![single],
        (None, _) => Vec::new(),
    }
}

fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(country: &str, primary: bool) -> Location {
        let mut loc = Location::new(country, None);
        loc.is_primary = primary;
        loc
    }

    #[test]
    fn test_full_name_collapses_empty_parts() {
        let mut contact = Contact::new("  Ada ", "Lovelace");
        assert_eq!(contact.full_name(), "Ada Lovelace");

        contact.first_name = String::new();
        assert_eq!(contact.full_name(), "Lovelace");

        contact.last_name = "   ".to_string();
        assert_eq!(contact.full_name(), "");
    }

    #[test]
    fn test_primary_location_prefers_flag() {
        let mut contact = Contact::new("A", "B");
        contact.locations = vec![location("Spain", false), location("France", true)];

        assert_eq!(contact.primary_location().unwrap().country, "France");
        let secondary = contact.secondary_locations();
        assert_eq!(secondary.len(), 1);
        assert_eq!(secondary[0].country, "Spain");
    }

    #[test]
    fn test_primary_location_falls_back_to_first_without_mutation() {
        let mut contact = Contact::new("A", "B");
        contact.locations = vec![location("Spain", false), location("Italy", false)];
        let before = contact.clone();

        assert_eq!(contact.primary_location().unwrap().country, "Spain");
        assert_eq!(contact.secondary_locations()[0].country, "Italy");
        assert_eq!(contact, before);
        assert!(!contact.locations[0].is_primary);
    }

    #[test]
    fn test_no_locations_has_no_primary() {
        let contact = Contact::new("A", "B");
        assert!(contact.primary_location().is_none());
        assert!(contact.secondary_locations().is_empty());
    }

    #[test]
    fn test_legacy_job_title_maps_to_list() {
        let json = r#"{"id":"c1","firstName":"Jo","lastName":"Doe","jobTitle":"Nurse","isFavorite":false,"locations":[]}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.job_titles, vec!["Nurse".to_string()]);
    }

    #[test]
    fn test_job_titles_list_wins_over_legacy_field() {
        let json = r#"{"id":"c1","firstName":"Jo","lastName":"Doe","jobTitles":["Cook","Driver"],"jobTitle":"Nurse"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.job_titles, vec!["Cook", "Driver"]);
        assert_eq!(contact.job_summary(), "Cook; Driver");
    }

    #[test]
    fn test_location_summary() {
        let mut loc = Location::new("France", Some("Bretagne".to_string()));
        assert_eq!(loc.summary(), "France (Bretagne)");
        loc.region = Some(String::new());
        assert_eq!(loc.summary(), "France");
    }
}
