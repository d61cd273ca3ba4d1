//! Data models for ContactShare.
//!
//! This module contains the record snapshots the export core reads:
//! - Contact and Location
//! - UserProfile
//! - ExportSubject (which records one export is about)

pub mod contact;
pub mod profile;
pub mod subject;

pub use contact::{Contact, Location, JOB_TITLE_SEPARATOR};
pub use profile::UserProfile;
pub use subject::{ExportFormat, ExportKind, ExportSubject, MimeKind};
