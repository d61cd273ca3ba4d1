//! JSON export and re-import.
//!
//! # File Format
//!
//! One pretty-printed document whose `kind` tells the reader what `data` holds:
//! ```json
//! {"kind":"contacts","data":[{"id":"…","firstName":"Ada",…}]}
//! ```
//! Record fields keep their model names. Optional fields that were never set
//! are left out rather than written as `null`, so a parse of the output
//! rebuilds the same records.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Contact, ExportKind, ExportSubject, UserProfile};

/// A parsed JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ExportDocument {
    Contact(Contact),
    Profile(UserProfile),
    Contacts(Vec<Contact>),
}

/// Borrowing twin of [`ExportDocument`] used on the write path.
#[derive(Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
enum ExportDocumentRef<'a> {
    Contact(&'a Contact),
    Profile(&'a UserProfile),
    Contacts(&'a [Contact]),
}

impl ExportDocument {
    #[must_use]
    pub const fn kind(&self) -> ExportKind {
        match self {
            Self::Contact(_) => ExportKind::Contact,
            Self::Profile(_) => ExportKind::Profile,
            Self::Contacts(_) => ExportKind::Contacts,
        }
    }

    #[must_use]
    pub fn into_subject(self) -> ExportSubject {
        match self {
            Self::Contact(contact) => ExportSubject::Single(contact),
            Self::Profile(profile) => ExportSubject::Profile(profile),
            Self::Contacts(contacts) => ExportSubject::Many(contacts),
        }
    }

    /// Contacts carried by the document, whether one or many.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDataShape` for a profile document.
    pub fn into_contacts(self) -> Result<Vec<Contact>> {
        match self {
            Self::Contact(contact) => Ok(vec![contact]),
            Self::Contacts(contacts) => Ok(contacts),
            Self::Profile(_) => Err(Error::UnsupportedDataShape {
                shape: ExportKind::Profile.to_string(),
                target: "contact list".to_string(),
            }),
        }
    }
}

/// Serialize a subject as a JSON export document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(subject: &ExportSubject) -> Result<String> {
    let doc = match subject {
        ExportSubject::Single(contact) => ExportDocumentRef::Contact(contact),
        ExportSubject::Profile(profile) => ExportDocumentRef::Profile(profile),
        ExportSubject::Many(contacts) => ExportDocumentRef::Contacts(contacts),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a JSON export document.
///
/// A bare JSON array is read as a contact list, for files written by hand
/// or by older versions.
///
/// # Errors
///
/// Returns a JSON error when the text is not a valid export document.
pub fn parse_export_document(text: &str) -> Result<ExportDocument> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let contacts: Vec<Contact> = serde_json::from_str(trimmed)?;
        return Ok(ExportDocument::Contacts(contacts));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Parse a document and require a specific kind.
///
/// # Errors
///
/// Returns `UnsupportedDataShape` when the document holds another kind.
pub fn parse_expecting(text: &str, expected: ExportKind) -> Result<ExportDocument> {
    let doc = parse_export_document(text)?;
    if doc.kind() == expected {
        Ok(doc)
    } else {
        Err(Error::UnsupportedDataShape {
            shape: doc.kind().to_string(),
            target: expected.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn full_contact() -> Contact {
        let mut contact = Contact::new("Ada", "Lovelace");
        contact.job_titles = vec!["Analyst".to_string(), "Writer".to_string()];
        contact.phone = Some("+44 20 7946 0000".to_string());
        contact.email = Some(String::new());
        contact.notes = Some("Met at \"the\" salon,\nLondon".to_string());
        contact.is_favorite = true;
        let mut home = Location::new("United Kingdom", Some("London".to_string()));
        home.is_primary = true;
        home.is_housed = true;
        contact.locations = vec![home, Location::new("Italy", None)];
        contact
    }

    #[test]
    fn test_contact_round_trip_preserves_every_field() {
        let contact = full_contact();
        let json = to_json(&ExportSubject::Single(contact.clone())).unwrap();

        let doc = parse_export_document(&json).unwrap();
        assert_eq!(doc, ExportDocument::Contact(contact));
    }

    #[test]
    fn test_absent_optionals_are_omitted_not_null() {
        let contact = Contact::new("Grace", "Hopper");
        let json = to_json(&ExportSubject::Single(contact.clone())).unwrap();

        assert!(!json.contains("null"));
        assert!(!json.contains("\"phone\""));
        assert!(!json.contains("\"notes\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "contact");
        assert_eq!(value["data"]["firstName"], "Grace");

        let back = parse_export_document(&json).unwrap().into_contacts().unwrap();
        assert_eq!(back, vec![contact]);
    }

    #[test]
    fn test_empty_string_survives_as_present() {
        let contact = full_contact();
        let json = to_json(&ExportSubject::Single(contact)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["email"], "");
    }

    #[test]
    fn test_empty_collection_is_empty_array() {
        let json = to_json(&ExportSubject::Many(Vec::new())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "contacts");
        assert_eq!(value["data"], serde_json::json!([]));
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = UserProfile {
            first_name: "Sam".to_string(),
            last_name: "Reed".to_string(),
            job_title: "Mechanic".to_string(),
            phone_number: "555".to_string(),
            email: "sam@example.com".to_string(),
            locations: vec![Location::new("Spain", Some("Galicia".to_string()))],
        };
        let json = to_json(&ExportSubject::Profile(profile.clone())).unwrap();
        let doc = parse_expecting(&json, ExportKind::Profile).unwrap();
        assert_eq!(doc, ExportDocument::Profile(profile));
    }

    #[test]
    fn test_document_converts_back_to_subject() {
        let subjects = [
            ExportSubject::Single(full_contact()),
            ExportSubject::Many(vec![full_contact(), Contact::new("Ben", "Okafor")]),
            ExportSubject::Profile(UserProfile::default()),
        ];
        for subject in subjects {
            let json = to_json(&subject).unwrap();
            let back = parse_export_document(&json).unwrap().into_subject();
            assert_eq!(back, subject);
        }
    }

    #[test]
    fn test_kind_mismatch_is_unsupported_shape() {
        let json = to_json(&ExportSubject::Profile(UserProfile::default())).unwrap();
        let err = parse_expecting(&json, ExportKind::Contacts).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDataShape { .. }));

        let err = parse_export_document(&json).unwrap().into_contacts().unwrap_err();
        assert!(matches!(err, Error::UnsupportedDataShape { .. }));
    }

    #[test]
    fn test_bare_array_reads_as_contacts() {
        let text = r#"[{"id":"1","firstName":"A","lastName":"B","jobTitle":"Cook"}]"#;
        let doc = parse_export_document(text).unwrap();
        let contacts = doc.into_contacts().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].job_titles, vec!["Cook"]);
    }
}
