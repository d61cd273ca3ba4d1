//! QR interchange codec.
//!
//! Device-to-device transfer without networking: records become compact
//! JSON strings small enough to scan reliably from a single QR symbol.
//!
//! - **Encode**: one contact or the profile → one payload
//! - **Batch**: filtered contacts → several array payloads
//! - **Decode**: scanned string → [`ParsedContact`] or an explicit failure
//!
//! # Payload Format
//!
//! Single-line minified UTF-8 JSON, no surrounding whitespace:
//! ```json
//! {"firstName":"Ada","lastName":"Lovelace","jobTitles":["Analyst"],"phone":"+44 1","locations":[{"country":"United Kingdom","isPrimary":true,"isLocalResident":true,"hasVehicle":false,"isHoused":true}]}
//! ```
//! A batch payload is a JSON array of those objects.

mod batch;
mod decode;
mod encode;

pub use batch::encode_batch_for_qr;
pub use decode::{
    decode_batch_from_qr, decode_from_qr, decode_scan, ParsedContact, ParsedLocation, ScanResult,
    MAX_SCAN_CHARS,
};
pub use encode::encode_for_qr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Character ceiling for one QR payload.
///
/// 2,000 characters keeps dense symbols scannable by typical phone cameras.
/// The same budget bounds single payloads and every batch payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct QrBudget(usize);

impl QrBudget {
    pub const DEFAULT_CHARS: usize = 2000;

    /// Smallest budget that can still hold a name-only payload.
    pub const MIN_CHARS: usize = 64;

    /// # Errors
    ///
    /// Returns `InvalidArgument` for budgets below [`Self::MIN_CHARS`] or
    /// above [`MAX_SCAN_CHARS`].
    pub fn new(chars: usize) -> Result<Self> {
        if !(Self::MIN_CHARS..=MAX_SCAN_CHARS).contains(&chars) {
            return Err(Error::InvalidArgument(format!(
                "QR budget must be between {} and {MAX_SCAN_CHARS} characters, got {chars}",
                Self::MIN_CHARS
            )));
        }
        Ok(Self(chars))
    }

    #[must_use]
    pub const fn chars(self) -> usize {
        self.0
    }
}

impl Default for QrBudget {
    fn default() -> Self {
        Self(Self::DEFAULT_CHARS)
    }
}

impl TryFrom<usize> for QrBudget {
    type Error = Error;

    fn try_from(chars: usize) -> Result<Self> {
        Self::new(chars)
    }
}

impl From<QrBudget> for usize {
    fn from(budget: QrBudget) -> Self {
        budget.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_bounds() {
        assert_eq!(QrBudget::default().chars(), 2000);
        assert!(QrBudget::new(10).is_err());
        assert!(QrBudget::new(MAX_SCAN_CHARS + 1).is_err());
        assert_eq!(QrBudget::new(500).unwrap().chars(), 500);
    }

    #[test]
    fn test_budget_deserializes_with_validation() {
        let budget: QrBudget = serde_json::from_str("1500").unwrap();
        assert_eq!(budget.chars(), 1500);
        assert!(serde_json::from_str::<QrBudget>("0").is_err());
    }
}
