//! Plain-text export for reading or pasting into a message.
//!
//! Lossy by nature: one labeled block per record, blocks separated by a
//! blank line. Labels come in a fixed order and absent values are skipped.

use std::fmt::Write as _;

use crate::model::{ExportSubject, Location};
use crate::serialize::view::{yes_no, RecordView};

/// Render a subject as human-readable text. No records gives an empty string.
#[must_use]
pub fn to_text(subject: &ExportSubject) -> String {
    match subject {
        ExportSubject::Single(contact) => block(contact),
        ExportSubject::Profile(profile) => block(profile),
        ExportSubject::Many(contacts) => contacts
            .iter()
            .map(block)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn block<R: RecordView>(record: &R) -> String {
    let mut out = String::new();

    let name = record.full_name();
    let _ = writeln!(out, "Name: {}", if name.is_empty() { "(no name)" } else { name.as_str() });

    let jobs = record.job_titles();
    match jobs.len() {
        0 => {}
        1 => {
            let _ = writeln!(out, "Job: {}", jobs[0]);
        }
        _ => {
            let _ = writeln!(out, "Jobs: {}", jobs.join(", "));
        }
    }

    if let Some(phone) = record.phone().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "Phone: {phone}");
    }
    if let Some(email) = record.email().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "Email: {email}");
    }

    if let Some(primary) = record.primary_location() {
        let _ = writeln!(out, "Primary Location: {}", primary.summary());
        let _ = writeln!(out, "  Local Resident: {}", yes_no(primary.is_local_resident));
        let _ = writeln!(out, "  Has Vehicle: {}", yes_no(primary.has_vehicle));
        let _ = writeln!(out, "  Housed: {}", yes_no(primary.is_housed));
    }

    let secondary = record.secondary_locations();
    if !secondary.is_empty() {
        out.push_str("Other Locations:\n");
        for location in secondary {
            let _ = writeln!(out, "  - {}", describe(location));
        }
    }

    if let Some(notes) = record.notes().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "Notes: {notes}");
    }

    // Trailing newline would turn the block separator into two blank lines.
    out.truncate(out.trim_end_matches('\n').len());
    out
}

fn describe(location: &Location) -> String {
    let attributes: Vec<&str> = [
        (location.is_local_resident, "local resident"),
        (location.has_vehicle, "has vehicle"),
        (location.is_housed, "housed"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();

    if attributes.is_empty() {
        location.summary()
    } else {
        format!("{} [{}]", location.summary(), attributes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, UserProfile};

    #[test]
    fn test_empty_collection_is_empty_string() {
        assert_eq!(to_text(&ExportSubject::Many(Vec::new())), "");
    }

    #[test]
    fn test_block_label_order() {
        let mut c = Contact::new("Ada", "Lovelace");
        c.job_titles = vec!["Analyst".to_string()];
        c.phone = Some("123".to_string());
        c.email = Some("ada@example.com".to_string());
        c.notes = Some("Prefers email".to_string());
        let mut home = Location::new("United Kingdom", Some("London".to_string()));
        home.is_housed = true;
        let mut away = Location::new("Italy", None);
        away.has_vehicle = true;
        c.locations = vec![home, away];

        let text = to_text(&ExportSubject::Single(c));
        let expected = "Name: Ada Lovelace\n\
                        Job: Analyst\n\
                        Phone: 123\n\
                        Email: ada@example.com\n\
                        Primary Location: United Kingdom (London)\n  \
                        Local Resident: No\n  \
                        Has Vehicle: No\n  \
                        Housed: Yes\n\
                        Other Locations:\n  \
                        - Italy [has vehicle]\n\
                        Notes: Prefers email";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let mut a = Contact::new("A", "One");
        a.job_titles = vec!["Cook".to_string(), "Driver".to_string()];
        let b = Contact::new("B", "Two");

        let text = to_text(&ExportSubject::Many(vec![a, b]));
        assert_eq!(text, "Name: A One\nJobs: Cook, Driver\n\nName: B Two");
    }

    #[test]
    fn test_profile_block_uses_phone_number() {
        let profile = UserProfile {
            first_name: "Sam".to_string(),
            phone_number: "555".to_string(),
            ..UserProfile::default()
        };
        let text = to_text(&ExportSubject::Profile(profile));
        assert_eq!(text, "Name: Sam\nPhone: 555");
    }
}
