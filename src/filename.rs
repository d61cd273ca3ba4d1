//! Export filename generation.
//!
//! Names look like `contactshare_contacts_20250120_103000.csv`: prefix, kind,
//! UTC timestamp to the second, format extension. A second export of the same
//! kind and format within the same second gets a counter suffix
//! (`…_103000_2.csv`) instead of reusing the name, and names the destination
//! already holds are skipped the same way.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::model::{ExportFormat, ExportKind};

/// Prefix used when none (or an unusable one) is configured.
pub const DEFAULT_FILENAME_PREFIX: &str = "contactshare";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Produces export filenames; owns the per-second collision counters.
#[derive(Debug, Clone)]
pub struct FilenameGenerator {
    prefix: String,
    second: Option<String>,
    issued: HashMap<(ExportKind, ExportFormat), u32>,
}

impl Default for FilenameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME_PREFIX)
    }
}

impl FilenameGenerator {
    /// Characters outside `[A-Za-z0-9_-]` are stripped from the prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let cleaned: String = prefix
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        Self {
            prefix: if cleaned.is_empty() {
                DEFAULT_FILENAME_PREFIX.to_string()
            } else {
                cleaned
            },
            second: None,
            issued: HashMap::new(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Filename for an export happening now.
    pub fn filename(&mut self, format: ExportFormat, kind: ExportKind) -> String {
        self.filename_at(format, kind, Utc::now())
    }

    /// Filename for an export happening now, skipping names `taken` reports
    /// as already in use at the destination.
    pub fn filename_avoiding(
        &mut self,
        format: ExportFormat,
        kind: ExportKind,
        taken: impl Fn(&str) -> bool,
    ) -> String {
        self.filename_at_avoiding(format, kind, Utc::now(), taken)
    }

    /// Filename for an export happening at `at`.
    pub fn filename_at(&mut self, format: ExportFormat, kind: ExportKind, at: DateTime<Utc>) -> String {
        self.filename_at_avoiding(format, kind, at, |_| false)
    }

    /// Filename for an export happening at `at`. The counter keeps climbing
    /// while `taken` rejects the candidate.
    pub fn filename_at_avoiding(
        &mut self,
        format: ExportFormat,
        kind: ExportKind,
        at: DateTime<Utc>,
        taken: impl Fn(&str) -> bool,
    ) -> String {
        let stamp = at.format(TIMESTAMP_FORMAT).to_string();
        if self.second.as_deref() != Some(stamp.as_str()) {
            self.issued.clear();
            self.second = Some(stamp.clone());
        }

        let base = format!("{}_{}_{stamp}", self.prefix, kind.as_str());
        let count = self.issued.entry((kind, format)).or_insert(0);
        loop {
            *count += 1;
            let name = if *count == 1 {
                format!("{base}.{}", format.extension())
            } else {
                format!("{base}_{count}.{}", format.extension())
            };
            if taken(&name) {
                continue;
            }
            if *count > 1 {
                warn!(kind = kind.as_str(), format = format.as_str(), count = *count, "Disambiguating export filename");
            }
            return name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, h, m, s).unwrap()
    }

    #[test]
    fn test_name_layout() {
        let mut names = FilenameGenerator::default();
        assert_eq!(
            names.filename_at(ExportFormat::Csv, ExportKind::Contacts, at(10, 30, 0)),
            "contactshare_contacts_20250120_103000.csv"
        );
        assert_eq!(
            names.filename_at(ExportFormat::Text, ExportKind::Profile, at(10, 30, 0)),
            "contactshare_profile_20250120_103000.txt"
        );
    }

    #[test]
    fn test_same_second_gets_counter() {
        let mut names = FilenameGenerator::default();
        let first = names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 0));
        let other_format = names.filename_at(ExportFormat::Csv, ExportKind::Contact, at(9, 0, 0));
        let second = names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 0));
        let third = names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 0));

        assert_eq!(first, "contactshare_contact_20250120_090000.json");
        assert_eq!(other_format, "contactshare_contact_20250120_090000.csv");
        assert_eq!(second, "contactshare_contact_20250120_090000_2.json");
        assert_eq!(third, "contactshare_contact_20250120_090000_3.json");
    }

    #[test]
    fn test_counter_resets_next_second() {
        let mut names = FilenameGenerator::default();
        names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 0));
        names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 0));
        assert_eq!(
            names.filename_at(ExportFormat::Json, ExportKind::Contact, at(9, 0, 1)),
            "contactshare_contact_20250120_090001.json"
        );
    }

    #[test]
    fn test_taken_names_are_skipped() {
        let mut names = FilenameGenerator::default();
        let existing = [
            "contactshare_contacts_20250120_103000.csv",
            "contactshare_contacts_20250120_103000_2.csv",
        ];
        let taken = |name: &str| existing.contains(&name);

        assert_eq!(
            names.filename_at_avoiding(ExportFormat::Csv, ExportKind::Contacts, at(10, 30, 0), taken),
            "contactshare_contacts_20250120_103000_3.csv"
        );
        assert_eq!(
            names.filename_at_avoiding(ExportFormat::Csv, ExportKind::Contacts, at(10, 30, 0), taken),
            "contactshare_contacts_20250120_103000_4.csv"
        );
        assert_eq!(
            names.filename_at_avoiding(ExportFormat::Json, ExportKind::Contacts, at(10, 30, 0), taken),
            "contactshare_contacts_20250120_103000.json"
        );
    }

    #[test]
    fn test_prefix_is_sanitized() {
        assert_eq!(FilenameGenerator::new("My Book!").prefix(), "MyBook");
        assert_eq!(FilenameGenerator::new("../").prefix(), DEFAULT_FILENAME_PREFIX);
    }
}
