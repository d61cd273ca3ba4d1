//! Filter evaluator for contact collections.
//!
//! Structured filters are ANDed together; the region set matches if any of
//! its values matches (OR within the field). A non-blank search term must
//! match as well.
//!
//! With no criteria at all, [`select_matching`] keeps every contact, which is
//! what list screens want. Multi-contact QR export refuses that case; it
//! checks [`Criteria::is_empty`] itself instead of relying on the selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Contact;

/// Structured filters from the filter sheet.
///
/// Boolean filters mean "at least one location has this attribute set";
/// `false` leaves the filter off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFilters {
    /// Exact match against any of the contact's job titles.
    pub job: Option<String>,
    /// Exact match against any location's country.
    pub country: Option<String>,
    /// Accepted regions; any location's region may match.
    pub regions: BTreeSet<String>,
    pub is_housed: bool,
    pub is_local_resident: bool,
    pub has_vehicle: bool,
}

impl ContactFilters {
    /// True when no filter field is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        active(self.job.as_deref()).is_none()
            && active(self.country.as_deref()).is_none()
            && self.regions.iter().all(|r| r.trim().is_empty())
            && !self.is_housed
            && !self.is_local_resident
            && !self.has_vehicle
    }

    /// Whether a contact passes every active filter.
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(job) = active(self.job.as_deref()) {
            if !contact.job_titles.iter().any(|t| t == job) {
                return false;
            }
        }

        if let Some(country) = active(self.country.as_deref()) {
            if !contact.locations.iter().any(|l| l.country == country) {
                return false;
            }
        }

        let regions: Vec<&str> = self
            .regions
            .iter()
            .map(String::as_str)
            .filter(|r| !r.trim().is_empty())
            .collect();
        if !regions.is_empty()
            && !contact
                .locations
                .iter()
                .any(|l| l.region.as_deref().is_some_and(|r| regions.contains(&r)))
        {
            return false;
        }

        let requires = |wanted: bool, get: fn(&crate::model::Location) -> bool| {
            !wanted || contact.locations.iter().any(get)
        };
        requires(self.is_housed, |l| l.is_housed)
            && requires(self.is_local_resident, |l| l.is_local_resident)
            && requires(self.has_vehicle, |l| l.has_vehicle)
    }
}

/// Filters plus free-text search, as captured from one screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Criteria {
    pub filters: ContactFilters,
    pub search: String,
}

impl Criteria {
    #[must_use]
    pub fn new(filters: ContactFilters, search: impl Into<String>) -> Self {
        Self {
            filters,
            search: search.into(),
        }
    }

    /// True when neither a filter nor a search term is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && active(Some(self.search.as_str())).is_none()
    }

    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        self.filters.matches(contact) && matches_search(contact, &self.search)
    }
}

/// Case-insensitive substring search over name, job titles, phone and email.
///
/// A blank term matches everything.
#[must_use]
pub fn matches_search(contact: &Contact, search: &str) -> bool {
    let Some(term) = active(Some(search)) else {
        return true;
    };
    let needle = term.to_lowercase();
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    hit(contact.full_name().as_str())
        || hit(contact.first_name.as_str())
        || hit(contact.last_name.as_str())
        || contact.job_titles.iter().any(|t| hit(t.as_str()))
        || contact.phone.as_deref().is_some_and(hit)
        || contact.email.as_deref().is_some_and(hit)
}

/// Contacts passing `filters` and `search`, in collection order.
///
/// Empty criteria select everything.
#[must_use]
pub fn select_matching<'a>(
    contacts: &'a [Contact],
    filters: &ContactFilters,
    search: &str,
) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|c| filters.matches(c) && matches_search(c, search))
        .collect()
}

fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn contact(first: &str, last: &str, country: &str, region: Option<&str>, vehicle: bool) -> Contact {
        let mut c = Contact::new(first, last);
        let mut loc = Location::new(country, region.map(str::to_string));
        loc.has_vehicle = vehicle;
        c.locations = vec![loc];
        c
    }

    fn names(selected: &[&Contact]) -> Vec<String> {
        selected.iter().map(|c| c.first_name.clone()).collect()
    }

    #[test]
    fn test_country_and_vehicle_filters() {
        let contacts = vec![
            contact("A", "Smith", "France", None, true),
            contact("B", "Jones", "Spain", None, false),
        ];

        let by_country = ContactFilters {
            country: Some("France".to_string()),
            ..ContactFilters::default()
        };
        assert_eq!(names(&select_matching(&contacts, &by_country, "")), vec!["A"]);

        let by_vehicle = ContactFilters {
            has_vehicle: true,
            ..ContactFilters::default()
        };
        assert_eq!(names(&select_matching(&contacts, &by_vehicle, "")), vec!["A"]);
    }

    #[test]
    fn test_empty_criteria_select_everything_for_listing() {
        let contacts = vec![
            contact("A", "Smith", "France", None, true),
            contact("B", "Jones", "Spain", None, false),
        ];
        let filters = ContactFilters::default();
        assert!(filters.is_empty());
        assert_eq!(select_matching(&contacts, &filters, "  ").len(), 2);
        assert!(Criteria::default().is_empty());
    }

    #[test]
    fn test_fields_are_anded_regions_are_ored() {
        let contacts = vec![
            contact("A", "X", "France", Some("Bretagne"), true),
            contact("B", "Y", "France", Some("Alsace"), false),
            contact("C", "Z", "France", Some("Corse"), true),
        ];
        let filters = ContactFilters {
            country: Some("France".to_string()),
            regions: ["Bretagne", "Alsace"].into_iter().map(String::from).collect(),
            ..ContactFilters::default()
        };
        assert_eq!(names(&select_matching(&contacts, &filters, "")), vec!["A", "B"]);

        let with_vehicle = ContactFilters {
            has_vehicle: true,
            ..filters
        };
        assert_eq!(names(&select_matching(&contacts, &with_vehicle, "")), vec!["A"]);
    }

    #[test]
    fn test_job_filter_is_exact_against_any_title() {
        let mut a = contact("A", "X", "France", None, false);
        a.job_titles = vec!["Cook".to_string(), "Driver".to_string()];
        let mut b = contact("B", "Y", "France", None, false);
        b.job_titles = vec!["Driver's mate".to_string()];
        let contacts = vec![a, b];

        let filters = ContactFilters {
            job: Some("Driver".to_string()),
            ..ContactFilters::default()
        };
        assert_eq!(names(&select_matching(&contacts, &filters, "")), vec!["A"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut a = contact("Anna", "Smith", "France", None, false);
        a.email = Some("anna@EXAMPLE.org".to_string());
        let mut b = contact("Ben", "Okafor", "Spain", None, false);
        b.phone = Some("+34 600".to_string());
        b.job_titles = vec!["Plumber".to_string()];
        let contacts = vec![a, b];

        let none = ContactFilters::default();
        assert_eq!(names(&select_matching(&contacts, &none, "SMITH")), vec!["Anna"]);
        assert_eq!(names(&select_matching(&contacts, &none, "example.ORG")), vec!["Anna"]);
        assert_eq!(names(&select_matching(&contacts, &none, "plumb")), vec!["Ben"]);
        assert_eq!(names(&select_matching(&contacts, &none, "+34")), vec!["Ben"]);
        assert_eq!(names(&select_matching(&contacts, &none, "anna smith")), vec!["Anna"]);
        assert!(select_matching(&contacts, &none, "zzz").is_empty());
    }

    #[test]
    fn test_search_and_filters_must_both_hold() {
        let contacts = vec![
            contact("A", "Smith", "France", None, false),
            contact("B", "Smith", "Spain", None, false),
        ];
        let criteria = Criteria::new(
            ContactFilters {
                country: Some("Spain".to_string()),
                ..ContactFilters::default()
            },
            "smith",
        );
        assert!(!criteria.is_empty());
        let selected: Vec<_> = contacts.iter().filter(|c| criteria.matches(c)).collect();
        assert_eq!(names(&selected), vec!["B"]);
    }

    #[test]
    fn test_blank_filter_values_count_as_empty() {
        let filters = ContactFilters {
            job: Some("  ".to_string()),
            country: Some(String::new()),
            regions: [String::new()].into_iter().collect(),
            ..ContactFilters::default()
        };
        assert!(filters.is_empty());
        assert!(!Criteria::new(filters, "smith").is_empty());
    }
}
