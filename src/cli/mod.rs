//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::filter::{ContactFilters, Criteria};
use crate::model::ExportFormat;

pub mod commands;

/// ContactShare CLI - export, share and scan contact records
#[derive(Parser, Debug)]
#[command(name = "cshare", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Address book path (default: ~/.contactshare/book.json)
    #[arg(long, global = true, env = "CSHARE_BOOK")]
    pub book: Option<PathBuf>,

    /// Config file path (default: ~/.contactshare/config.json)
    #[arg(long, global = true, env = "CSHARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export records to a JSON, CSV or text file
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Encode records as QR payloads
    Qr {
        #[command(subcommand)]
        command: QrCommands,
    },

    /// Decode a scanned QR payload
    Scan(ScanArgs),

    /// Read a JSON export file
    Import(ImportArgs),

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Export Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export your own profile
    Profile {
        #[command(flatten)]
        output: ExportOutputArgs,
    },

    /// Export one contact
    Contact {
        /// Contact ID
        id: String,

        #[command(flatten)]
        output: ExportOutputArgs,
    },

    /// Export contacts (all of them unless filtered)
    Contacts {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: ExportOutputArgs,
    },
}

/// File format for `export`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Re-importable JSON document (default)
    #[default]
    Json,
    /// One row per record, fixed columns
    Csv,
    /// Labeled blocks for reading
    Text,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
            FormatArg::Text => Self::Text,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ExportOutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatArg,

    /// Directory to write into (default from config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

// ============================================================================
// QR Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum QrCommands {
    /// QR payload for your profile
    Profile {
        #[command(flatten)]
        options: QrArgs,
    },

    /// QR payload for one contact
    Contact {
        /// Contact ID
        id: String,

        #[command(flatten)]
        options: QrArgs,
    },

    /// QR payloads for filtered contacts (a filter or search is required)
    Contacts {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        options: QrArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct QrArgs {
    /// Character budget per payload (default from config, 2000)
    #[arg(long)]
    pub qr_budget: Option<usize>,
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Search name, job titles, phone and email (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact job title
    #[arg(long)]
    pub job: Option<String>,

    /// Exact country of any location
    #[arg(long)]
    pub country: Option<String>,

    /// Region of any location (repeatable, any may match)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Require a housed location
    #[arg(long)]
    pub housed: bool,

    /// Require a location where the contact is a local resident
    #[arg(long)]
    pub local_resident: bool,

    /// Require a location with a vehicle
    #[arg(long)]
    pub has_vehicle: bool,
}

impl FilterArgs {
    #[must_use]
    pub fn to_criteria(&self) -> Criteria {
        Criteria::new(
            ContactFilters {
                job: self.job.clone(),
                country: self.country.clone(),
                regions: self.regions.iter().cloned().collect(),
                is_housed: self.housed,
                is_local_resident: self.local_resident,
                has_vehicle: self.has_vehicle,
            },
            self.search.clone().unwrap_or_default(),
        )
    }
}

// ============================================================================
// Scan / Import
// ============================================================================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Scanned text, or `-` to read it from stdin
    pub payload: String,

    /// Add the scanned contacts to the address book
    #[arg(long)]
    pub add: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON export file
    pub file: PathBuf,

    /// Add the imported contacts to the address book
    #[arg(long)]
    pub add: bool,
}
