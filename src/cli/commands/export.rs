//! Export command implementation.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use crate::cli::commands::open_book;
use crate::cli::{ExportCommands, ExportOutputArgs};
use crate::config::load_settings;
use crate::error::Result;
use crate::export::{DirectorySink, ExportOrchestrator};
use crate::filename::FilenameGenerator;
use crate::model::{ExportFormat, MimeKind};

#[derive(Serialize)]
struct ExportOutput<'a> {
    path: &'a Path,
    filename: &'a str,
    format: ExportFormat,
    mime: MimeKind,
    bytes: usize,
}

/// Execute export commands.
///
/// # Errors
///
/// Returns an error if config or the address book cannot be read, the
/// records are missing, or the file cannot be written.
pub fn execute(
    command: &ExportCommands,
    book_path: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let settings = load_settings(config_path)?;
    let book = open_book(book_path)?;

    let output = match command {
        ExportCommands::Profile { output }
        | ExportCommands::Contact { output, .. }
        | ExportCommands::Contacts { output, .. } => output,
    };
    let out_dir = resolve_out_dir(output, || settings.resolved_export_dir())?;
    let format = ExportFormat::from(output.format);

    let mut sink = DirectorySink::new(&out_dir);
    let mut orchestrator = ExportOrchestrator::new(&book, &book, &mut sink)
        .with_filenames(FilenameGenerator::new(&settings.filename_prefix));

    orchestrator.select_format(format)?;
    let artifact = match command {
        ExportCommands::Profile { .. } => orchestrator.export_profile(),
        ExportCommands::Contact { id, .. } => orchestrator.export_contact(id),
        ExportCommands::Contacts { filters, .. } => {
            orchestrator.export_contacts(&filters.to_criteria())
        }
    }?;
    drop(orchestrator);

    let path = sink
        .written()
        .last()
        .cloned()
        .unwrap_or_else(|| out_dir.join(&artifact.filename));

    if json {
        let output = ExportOutput {
            path: &path,
            filename: &artifact.filename,
            format,
            mime: artifact.mime,
            bytes: artifact.content.len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "{} {} {}",
            "Exported".green().bold(),
            path.display(),
            format!("({}, {} bytes)", artifact.mime, artifact.content.len()).dimmed()
        );
    }
    Ok(())
}

fn resolve_out_dir(
    output: &ExportOutputArgs,
    fallback: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    match &output.out_dir {
        Some(dir) => Ok(dir.clone()),
        None => fallback(),
    }
}
