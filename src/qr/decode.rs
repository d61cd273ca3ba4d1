//! Parsing scanned QR strings.
//!
//! Scanned text is untrusted. A payload either parses strictly into a record
//! with at least a first or last name, or the whole decode fails; there is
//! no best-effort partial result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::contact::normalize_job_titles;
use crate::model::{Contact, Location};

/// Largest string a QR symbol can carry (version 40, numeric mode).
pub const MAX_SCAN_CHARS: usize = 7089;

/// A contact recovered from a scan, ready for the "add contact" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContact {
    pub first_name: String,
    pub last_name: String,
    pub job_titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub locations: Vec<ParsedLocation>,
}

/// Location recovered from a scan. Dropped attributes read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLocation {
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

/// What a scan turned out to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Single(ParsedContact),
    Batch(Vec<ParsedContact>),
}

impl ScanResult {
    #[must_use]
    pub fn into_contacts(self) -> Vec<ParsedContact> {
        match self {
            Self::Single(contact) => vec![contact],
            Self::Batch(contacts) => contacts,
        }
    }
}

/// Accepts both the contact payload and the profile payload spellings.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadRepr {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    job_titles: Option<Vec<String>>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    locations: Vec<ParsedLocation>,
}

impl TryFrom<PayloadRepr> for ParsedContact {
    type Error = Error;

    fn try_from(repr: PayloadRepr) -> Result<Self> {
        let present = |name: &Option<String>| name.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !present(&repr.first_name) && !present(&repr.last_name) {
            return Err(Error::decode("payload has neither firstName nor lastName"));
        }

        Ok(Self {
            first_name: repr.first_name.unwrap_or_default(),
            last_name: repr.last_name.unwrap_or_default(),
            job_titles: normalize_job_titles(repr.job_titles, repr.job_title),
            phone: repr.phone,
            email: repr.email,
            notes: repr.notes,
            locations: repr.locations,
        })
    }
}

impl ParsedContact {
    /// Flagged primary location, falling back to the first one.
    #[must_use]
    pub fn primary_location(&self) -> Option<&ParsedLocation> {
        self.locations
            .iter()
            .find(|l| l.is_primary)
            .or_else(|| self.locations.first())
    }

    /// Build a new address book entry with fresh IDs.
    #[must_use]
    pub fn into_contact(self) -> Contact {
        let mut contact = Contact::new(self.first_name, self.last_name);
        contact.job_titles = self.job_titles;
        contact.phone = self.phone;
        contact.email = self.email;
        contact.notes = self.notes;
        contact.locations = self
            .locations
            .into_iter()
            .map(|parsed| {
                let mut location = Location::new(parsed.country, parsed.region);
                location.is_primary = parsed.is_primary;
                location.is_local_resident = parsed.is_local_resident;
                location.has_vehicle = parsed.has_vehicle;
                location.is_housed = parsed.is_housed;
                location
            })
            .collect();
        contact
    }
}

fn guard(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::decode("scanned text is empty"));
    }
    let size = trimmed.chars().count();
    if size > MAX_SCAN_CHARS {
        return Err(Error::decode(format!(
            "scanned text is {size} characters, more than a QR code can hold"
        )));
    }
    Ok(trimmed)
}

/// Decode a single-record payload.
///
/// # Errors
///
/// Returns `QrDecodeFailed` when the text is not a JSON object of the
/// payload shape or carries no name at all.
pub fn decode_from_qr(raw: &str) -> Result<ParsedContact> {
    let text = guard(raw)?;
    if !text.starts_with('{') {
        return Err(Error::decode("not a contact payload: expected a JSON object"));
    }
    let repr: PayloadRepr = serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, "Scanned text is not a contact payload");
        Error::decode(format!("not a contact payload: {e}"))
    })?;
    ParsedContact::try_from(repr)
}

/// Decode a batch payload (a JSON array of single-record payloads).
///
/// # Errors
///
/// Returns `QrDecodeFailed` if the text is not an array or any element is
/// not a valid record.
pub fn decode_batch_from_qr(raw: &str) -> Result<Vec<ParsedContact>> {
    let text = guard(raw)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, "Scanned text is not a batch payload");
        Error::decode(format!("not a contact batch payload: {e}"))
    })?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(Error::decode(format!("entry {index}: expected a JSON object")));
            }
            let repr: PayloadRepr = serde_json::from_value(entry)
                .map_err(|e| Error::decode(format!("entry {index}: {e}")))?;
            ParsedContact::try_from(repr).map_err(|e| match e {
                Error::QrDecodeFailed { reason } => Error::decode(format!("entry {index}: {reason}")),
                other => other,
            })
        })
        .collect()
}

/// Decode whatever a scan produced, single record or batch.
///
/// # Errors
///
/// Returns `QrDecodeFailed` when neither shape matches.
pub fn decode_scan(raw: &str) -> Result<ScanResult> {
    if guard(raw)?.starts_with('[') {
        decode_batch_from_qr(raw).map(ScanResult::Batch)
    } else {
        decode_from_qr(raw).map(ScanResult::Single)
    }
}
