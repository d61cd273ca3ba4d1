//! Serialization engine: records to JSON, CSV or plain text.
//!
//! Every function here is pure. Records are borrowed, never modified, and the
//! output is a `String` the caller hands to whatever saves or shares it.
//!
//! - **JSON**: field-for-field mirror of the model, re-importable
//! - **CSV**: fixed column order, one row per record
//! - **Text**: labeled blocks for humans, not meant to be parsed back

mod csv;
mod json;
mod text;
mod view;

pub use self::csv::{to_csv, CSV_COLUMNS};
pub use self::json::{parse_expecting, parse_export_document, to_json, ExportDocument};
pub use self::text::to_text;

use crate::error::Result;
use crate::model::{ExportFormat, ExportSubject};

/// Serialize a subject in the requested file format.
///
/// # Errors
///
/// Returns an error if the underlying serializer fails.
pub fn serialize(subject: &ExportSubject, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(subject),
        ExportFormat::Csv => to_csv(subject),
        ExportFormat::Text => Ok(to_text(subject)),
    }
}
