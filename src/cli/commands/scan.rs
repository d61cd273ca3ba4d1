//! Scan command implementation.

use std::io::{self, Read};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::commands::open_book;
use crate::cli::ScanArgs;
use crate::error::{Error, Result};
use crate::qr::{decode_scan, ParsedContact, ScanResult};

#[derive(Serialize)]
struct ScanOutput<'a> {
    kind: &'static str,
    contacts: &'a [ParsedContact],
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<usize>,
}

/// Execute the scan command.
///
/// # Errors
///
/// Returns `QrDecodeFailed` for anything that is not a ContactShare payload,
/// or a store error if `--add` cannot update the address book.
pub fn execute(args: &ScanArgs, book_path: Option<&Path>, json: bool) -> Result<()> {
    let raw = if args.payload == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.payload.clone()
    };

    let scan = decode_scan(&raw)?;
    let kind = match scan {
        ScanResult::Single(_) => "single",
        ScanResult::Batch(_) => "batch",
    };
    let contacts = scan.into_contacts();

    let added = if args.add {
        let mut book = open_book(book_path)?;
        let added = book
            .add_contacts(contacts.iter().cloned().map(ParsedContact::into_contact))
            .map_err(|e| Error::Store(format!("{e:#}")))?;
        info!(added, "Added scanned contacts");
        Some(added)
    } else {
        None
    };

    if json {
        let output = ScanOutput {
            kind,
            contacts: &contacts,
            added,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for (index, contact) in contacts.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_contact(contact);
    }
    if let Some(added) = added {
        println!();
        println!("{} {added} contact(s)", "Added".green().bold());
    }
    Ok(())
}

fn print_contact(contact: &ParsedContact) {
    let name = format!("{} {}", contact.first_name, contact.last_name);
    println!("{}", name.trim().bold());
    if !contact.job_titles.is_empty() {
        println!("  {} {}", "Job:".dimmed(), contact.job_titles.join(", "));
    }
    if let Some(phone) = &contact.phone {
        println!("  {} {phone}", "Phone:".dimmed());
    }
    if let Some(email) = &contact.email {
        println!("  {} {email}", "Email:".dimmed());
    }
    if let Some(primary) = contact.primary_location() {
        match &primary.region {
            Some(region) => println!("  {} {} ({region})", "Location:".dimmed(), primary.country),
            None => println!("  {} {}", "Location:".dimmed(), primary.country),
        }
    }
}
