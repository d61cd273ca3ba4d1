//! Version command implementation.

use crate::error::Result;
use crate::qr::{QrBudget, MAX_SCAN_CHARS};
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    default_qr_budget: usize,
    max_scan_chars: usize,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        let output = VersionOutput {
            version,
            build,
            default_qr_budget: QrBudget::DEFAULT_CHARS,
            max_scan_chars: MAX_SCAN_CHARS,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("cshare version {version} ({build})");
    println!("  QR budget {} chars, scans up to {MAX_SCAN_CHARS}", QrBudget::DEFAULT_CHARS);
    Ok(())
}
