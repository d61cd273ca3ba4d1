//! What an export is about and what it is written as.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::profile::UserProfile;

/// The record(s) handed to one export or share gesture.
///
/// Serializers and the QR codec match on this exhaustively instead of
/// probing the data at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSubject {
    Single(Contact),
    Profile(UserProfile),
    Many(Vec<Contact>),
}

impl ExportSubject {
    #[must_use]
    pub const fn kind(&self) -> ExportKind {
        match self {
            Self::Single(_) => ExportKind::Contact,
            Self::Profile(_) => ExportKind::Profile,
            Self::Many(_) => ExportKind::Contacts,
        }
    }

    /// Number of records carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) | Self::Profile(_) => 1,
            Self::Many(contacts) => contacts.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Discriminator written into JSON exports and filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Contact,
    Profile,
    Contacts,
}

impl ExportKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Profile => "profile",
            Self::Contacts => "contacts",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File formats offered by the export sheet. QR is a separate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }

    #[must_use]
    pub const fn mime_kind(&self) -> MimeKind {
        match self {
            Self::Json => MimeKind::Json,
            Self::Csv => MimeKind::Csv,
            Self::Text => MimeKind::PlainText,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type handed to the save/share collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeKind {
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "text/csv")]
    Csv,
    #[serde(rename = "text/plain")]
    PlainText,
}

impl MimeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for MimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
