//! Import command implementation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::commands::open_book;
use crate::cli::ImportArgs;
use crate::error::{Error, Result};
use crate::model::ExportKind;
use crate::serialize::{parse_export_document, ExportDocument};

#[derive(Serialize)]
struct ImportOutput {
    kind: ExportKind,
    records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<usize>,
}

/// Execute the import command.
///
/// Without `--add` the file is only parsed and summarized.
///
/// # Errors
///
/// Returns an error if the file is not a JSON export, `--add` is used with a
/// profile export, or the address book cannot be written.
pub fn execute(args: &ImportArgs, book_path: Option<&Path>, json: bool) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let document = parse_export_document(&text)?;
    let kind = document.kind();
    let records = match &document {
        ExportDocument::Contact(_) | ExportDocument::Profile(_) => 1,
        ExportDocument::Contacts(contacts) => contacts.len(),
    };

    let (added, skipped) = if args.add {
        let incoming = document.into_contacts()?;
        let mut book = open_book(book_path)?;

        let known: HashSet<String> = book.book().contacts.iter().map(|c| c.id.clone()).collect();
        let (duplicates, fresh): (Vec<_>, Vec<_>) =
            incoming.into_iter().partition(|c| known.contains(&c.id));

        let added = book
            .add_contacts(fresh)
            .map_err(|e| Error::Store(format!("{e:#}")))?;
        info!(added, skipped = duplicates.len(), "Imported contacts");
        (Some(added), Some(duplicates.len()))
    } else {
        (None, None)
    };

    if json {
        let output = ImportOutput {
            kind,
            records,
            added,
            skipped,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!(
        "{} {} export with {records} record(s)",
        "Read".green().bold(),
        kind.to_string().bold()
    );
    if let (Some(added), Some(skipped)) = (added, skipped) {
        println!("  Added {added}, skipped {skipped} already in the address book");
    }
    Ok(())
}
