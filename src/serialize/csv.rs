//! CSV export.
//!
//! Column order is fixed and is the contract: spreadsheet users and scripts
//! address columns by position. One header row, then one row per record.
//! Cells holding a comma, quote or line break are quoted with inner quotes
//! doubled, so a cell may span several physical lines.

use crate::error::{Error, Result};
use crate::model::{ExportSubject, JOB_TITLE_SEPARATOR};
use crate::serialize::view::{yes_no, RecordView};

/// Header row, in output order.
pub const CSV_COLUMNS: [&str; 14] = [
    "First Name",
    "Last Name",
    "Job Titles",
    "Phone",
    "Email",
    "Favorite",
    "Primary Country",
    "Primary Region",
    "Primary Local Resident",
    "Primary Has Vehicle",
    "Primary Housed",
    "Other Location Count",
    "Other Locations",
    "Notes",
];

/// Serialize a subject as CSV text.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn to_csv(subject: &ExportSubject) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;

    match subject {
        ExportSubject::Single(contact) => writer.write_record(row(contact))?,
        ExportSubject::Profile(profile) => writer.write_record(row(profile))?,
        ExportSubject::Many(contacts) => {
            for contact in contacts {
                writer.write_record(row(contact))?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV output is not UTF-8: {e}")))
}

fn row<R: RecordView>(record: &R) -> [String; 14] {
    let primary = record.primary_location();
    let secondary = record.secondary_locations();
    let flag = |get: fn(&crate::model::Location) -> bool| {
        primary.map(|l| yes_no(get(l)).to_string()).unwrap_or_default()
    };

    [
        record.first_name().to_string(),
        record.last_name().to_string(),
        record.job_titles().join(JOB_TITLE_SEPARATOR),
        record.phone().unwrap_or_default().to_string(),
        record.email().unwrap_or_default().to_string(),
        yes_no(record.is_favorite()).to_string(),
        primary.map(|l| l.country.clone()).unwrap_or_default(),
        primary.and_then(|l| l.region.clone()).unwrap_or_default(),
        flag(|l| l.is_local_resident),
        flag(|l| l.has_vehicle),
        flag(|l| l.is_housed),
        secondary.len().to_string(),
        secondary
            .iter()
            .map(|l| l.summary())
            .collect::<Vec<_>>()
            .join(JOB_TITLE_SEPARATOR),
        record.notes().unwrap_or_default().to_string(),
    ]
}
