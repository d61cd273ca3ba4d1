//! ContactShare - export, share and QR interchange for a personal address book
//!
//! This crate provides the export core and the `cshare` CLI built on it.
//!
//! # Architecture
//!
//! - [`model`] - Record snapshots (Contact, Location, UserProfile, ExportSubject)
//! - [`serialize`] - JSON, CSV and plain-text serializers
//! - [`qr`] - QR payload encoding, batch splitting and scan decoding
//! - [`filter`] - Structured filters and free-text search
//! - [`filename`] - Export filename generation
//! - [`export`] - Export state machine and its collaborators
//! - [`config`] - Configuration management
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filename;
pub mod filter;
pub mod model;
pub mod qr;
pub mod serialize;

pub use error::{Error, Result};
pub use export::{ExportArtifact, ExportOrchestrator, ExportState};
pub use filter::{select_matching, ContactFilters, Criteria};
pub use model::{Contact, ExportFormat, ExportKind, ExportSubject, Location, UserProfile};
pub use qr::{decode_from_qr, encode_batch_for_qr, encode_for_qr, QrBudget};
