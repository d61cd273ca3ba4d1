//! QR command implementation.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::cli::commands::open_book;
use crate::cli::{QrArgs, QrCommands};
use crate::config::load_settings;
use crate::error::Result;
use crate::export::{ExportArtifact, ExportOrchestrator, ExportSink};
use crate::qr::QrBudget;

#[derive(Serialize)]
struct QrOutput<'a> {
    budget: usize,
    count: usize,
    payloads: &'a [String],
}

/// QR sharing never saves files.
struct NoFiles;

impl ExportSink for NoFiles {
    fn deliver(&mut self, artifact: &ExportArtifact) -> anyhow::Result<()> {
        anyhow::bail!("QR sharing does not write files ({})", artifact.filename)
    }
}

/// Execute QR commands.
///
/// # Errors
///
/// Returns an error if the records are missing, the batch has no filters,
/// or a record cannot fit a QR payload.
pub fn execute(
    command: &QrCommands,
    book_path: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let settings = load_settings(config_path)?;

    let options = match command {
        QrCommands::Profile { options }
        | QrCommands::Contact { options, .. }
        | QrCommands::Contacts { options, .. } => options,
    };
    let budget = resolve_budget(options, settings.qr_budget)?;

    let book = open_book(book_path)?;
    let orchestrator = ExportOrchestrator::new(&book, &book, NoFiles).with_qr_budget(budget);

    let payloads = match command {
        QrCommands::Profile { .. } => vec![orchestrator.qr_for_profile()?],
        QrCommands::Contact { id, .. } => vec![orchestrator.qr_for_contact(id)?],
        QrCommands::Contacts { filters, .. } => {
            orchestrator.qr_for_contacts(&filters.to_criteria())?
        }
    };

    if json {
        let output = QrOutput {
            budget: budget.chars(),
            count: payloads.len(),
            payloads: &payloads,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let total = payloads.len();
    for (index, payload) in payloads.iter().enumerate() {
        if total > 1 {
            if index > 0 {
                println!();
            }
            println!(
                "{} {}",
                format!("QR {}/{total}", index + 1).cyan().bold(),
                format!("({} chars)", payload.chars().count()).dimmed()
            );
        }
        println!("{payload}");
    }
    Ok(())
}

fn resolve_budget(options: &QrArgs, configured: QrBudget) -> Result<QrBudget> {
    options.qr_budget.map_or(Ok(configured), QrBudget::new)
}
