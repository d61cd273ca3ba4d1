//! Single-record QR payloads.
//!
//! A payload is one line of minified JSON. When it does not fit the budget,
//! optional data is shed step by step (see [`DropStep`]); name, job titles,
//! phone and email are never dropped.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Contact, ExportSubject, Location, UserProfile};
use crate::qr::QrBudget;

/// Wire shape of one record inside a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrPayload {
    pub first_name: String,
    pub last_name: String,
    pub job_titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub locations: Vec<QrLocation>,
}

/// Location inside a payload. Attributes become `None` once dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrLocation {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_local_resident: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_vehicle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_housed: Option<bool>,
}

impl From<&Location> for QrLocation {
    fn from(location: &Location) -> Self {
        Self {
            country: location.country.clone(),
            region: location.region.clone(),
            is_primary: location.is_primary,
            is_local_resident: Some(location.is_local_resident),
            has_vehicle: Some(location.has_vehicle),
            is_housed: Some(location.is_housed),
        }
    }
}

impl QrPayload {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            job_titles: contact.job_titles.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            notes: contact.notes.clone(),
            locations: contact.locations.iter().map(QrLocation::from).collect(),
        }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        let filled = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            job_titles: profile.job_titles(),
            phone: filled(&profile.phone_number),
            email: filled(&profile.email),
            notes: None,
            locations: profile.locations.iter().map(QrLocation::from).collect(),
        }
    }
}

/// Optional data shed from an oversized payload, in the order applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DropStep {
    Notes,
    SecondaryLocations,
    LocationAttributes,
}

impl DropStep {
    pub const ORDER: [Self; 3] = [
        Self::Notes,
        Self::SecondaryLocations,
        Self::LocationAttributes,
    ];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::SecondaryLocations => "secondary_locations",
            Self::LocationAttributes => "location_attributes",
        }
    }

    /// Apply the step; returns whether anything was removed.
    fn apply(self, payload: &mut QrPayload) -> bool {
        match self {
            Self::Notes => payload.notes.take().is_some(),
            Self::SecondaryLocations => {
                if payload.locations.len() <= 1 {
                    return false;
                }
                // Same fallback as the record model: flagged entry, else the first.
                let keep = payload
                    .locations
                    .iter()
                    .position(|l| l.is_primary)
                    .unwrap_or(0);
                let primary = payload.locations.swap_remove(keep);
                payload.locations = vec![primary];
                true
            }
            Self::LocationAttributes => {
                let mut changed = false;
                for location in &mut payload.locations {
                    changed |= location.is_local_resident.take().is_some();
                    changed |= location.has_vehicle.take().is_some();
                    changed |= location.is_housed.take().is_some();
                }
                changed
            }
        }
    }
}

/// Length as counted against the budget.
pub(crate) fn char_len(payload: &str) -> usize {
    payload.chars().count()
}

/// Encode a single contact or the profile as one QR payload.
///
/// # Errors
///
/// - `UnsupportedDataShape` for a contact collection (use batch encoding)
/// - `QrPayloadTooLarge` when the record does not fit even with every
///   optional field dropped
pub fn encode_for_qr(subject: &ExportSubject, budget: QrBudget) -> Result<String> {
    let payload = match subject {
        ExportSubject::Single(contact) => QrPayload::from_contact(contact),
        ExportSubject::Profile(profile) => QrPayload::from_profile(profile),
        ExportSubject::Many(_) => {
            return Err(Error::UnsupportedDataShape {
                shape: subject.kind().to_string(),
                target: "a single QR payload".to_string(),
            });
        }
    };
    fit_to_budget(payload, budget.chars())
}

/// Serialize, shedding optional data until the payload fits `budget`.
pub(crate) fn fit_to_budget(mut payload: QrPayload, budget: usize) -> Result<String> {
    let mut encoded = serde_json::to_string(&payload)?;

    for step in DropStep::ORDER {
        let size = char_len(&encoded);
        if size <= budget {
            return Ok(encoded);
        }
        if step.apply(&mut payload) {
            encoded = serde_json::to_string(&payload)?;
            warn!(
                step = step.as_str(),
                before = size,
                after = char_len(&encoded),
                budget,
                "Dropped optional fields from QR payload"
            );
        }
    }

    let size = char_len(&encoded);
    if size <= budget {
        Ok(encoded)
    } else {
        debug!(size, budget, "QR payload over budget after dropping optional fields");
        Err(Error::QrPayloadTooLarge { size, budget })
    }
}
