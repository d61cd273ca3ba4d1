//! Export state machine.
//!
//! One orchestrator serves one export sheet:
//!
//! ```text
//! Idle -> FormatSelected -> Exporting -> { Done | Failed -> Idle }
//! ```
//!
//! A failed export reports its error and leaves the sheet `Idle`, so the
//! next attempt starts from a clean state.
//!
//! QR sharing never enters `Exporting`; it runs straight from whatever
//! state the sheet is in (except while a file export is running) and leaves
//! the state untouched, including when the filters-required gate refuses.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::export::collab::{ContactStore, ExportSink, ProfileStore};
use crate::filename::FilenameGenerator;
use crate::filter::Criteria;
use crate::model::{Contact, ExportFormat, ExportSubject, MimeKind, UserProfile};
use crate::qr::{encode_batch_for_qr, encode_for_qr, QrBudget};
use crate::serialize::serialize;

/// Where the export sheet currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    FormatSelected(ExportFormat),
    Exporting(ExportFormat),
    /// Last export was delivered. A new format selection starts over.
    Done,
    /// Transient: a failed export passes through here on its way to `Idle`.
    Failed,
}

impl ExportState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FormatSelected(_) => "format_selected",
            Self::Exporting(_) => "exporting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub content: String,
    pub filename: String,
    pub mime: MimeKind,
}

/// Drives file exports and QR sharing over injected collaborators.
pub struct ExportOrchestrator<C, P, S> {
    contacts: C,
    profile: P,
    sink: S,
    filenames: FilenameGenerator,
    qr_budget: QrBudget,
    state: ExportState,
}

impl<C, P, S> ExportOrchestrator<C, P, S>
where
    C: ContactStore,
    P: ProfileStore,
    S: ExportSink,
{
    /// Create an orchestrator with the default filename prefix and QR budget.
    pub fn new(contacts: C, profile: P, sink: S) -> Self {
        Self {
            contacts,
            profile,
            sink,
            filenames: FilenameGenerator::default(),
            qr_budget: QrBudget::default(),
            state: ExportState::Idle,
        }
    }

    #[must_use]
    pub fn with_filenames(mut self, filenames: FilenameGenerator) -> Self {
        self.filenames = filenames;
        self
    }

    #[must_use]
    pub const fn with_qr_budget(mut self, budget: QrBudget) -> Self {
        self.qr_budget = budget;
        self
    }

    #[must_use]
    pub const fn state(&self) -> ExportState {
        self.state
    }

    #[must_use]
    pub const fn qr_budget(&self) -> QrBudget {
        self.qr_budget
    }

    /// Back to `Idle` from anything but `Exporting`.
    ///
    /// # Errors
    ///
    /// Returns `ExportInProgress` while an export is running.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_not_exporting()?;
        self.transition(ExportState::Idle);
        Ok(())
    }

    /// Pick the file format for the next export.
    ///
    /// # Errors
    ///
    /// Returns `ExportInProgress` while an export is running.
    pub fn select_format(&mut self, format: ExportFormat) -> Result<()> {
        self.ensure_not_exporting()?;
        self.transition(ExportState::FormatSelected(format));
        Ok(())
    }

    // ── File exports ─────────────────────────────────────────

    /// Export the profile in the selected format.
    ///
    /// # Errors
    ///
    /// `ProfileNotFound` if no profile exists, otherwise see [`Self::export_subject`].
    pub fn export_profile(&mut self) -> Result<ExportArtifact> {
        let format = self.begin()?;
        let subject = self.load_profile().map(ExportSubject::Profile);
        self.finish(format, subject)
    }

    /// Export one contact in the selected format.
    ///
    /// # Errors
    ///
    /// `ContactNotFound` if `id` is unknown, otherwise see [`Self::export_subject`].
    pub fn export_contact(&mut self, id: &str) -> Result<ExportArtifact> {
        let format = self.begin()?;
        let subject = self.load_contact(id).map(ExportSubject::Single);
        self.finish(format, subject)
    }

    /// Export the contacts matching `criteria`; empty criteria export all.
    ///
    /// # Errors
    ///
    /// `NoMatchingContacts` if active criteria select nothing, otherwise see
    /// [`Self::export_subject`].
    pub fn export_contacts(&mut self, criteria: &Criteria) -> Result<ExportArtifact> {
        let format = self.begin()?;
        let subject = self.load_contacts().and_then(|all| {
            if criteria.is_empty() {
                return Ok(all);
            }
            let selected = select_owned(all, criteria);
            if selected.is_empty() {
                return Err(Error::NoMatchingContacts);
            }
            Ok(selected)
        });
        self.finish(format, subject.map(ExportSubject::Many))
    }

    /// Export an already loaded subject in the selected format.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if no format is selected
    /// - `ExportInProgress` if an export is running
    /// - `ExportIoFailed` if the sink rejects the artifact
    /// - serializer errors
    pub fn export_subject(&mut self, subject: ExportSubject) -> Result<ExportArtifact> {
        let format = self.begin()?;
        self.finish(format, Ok(subject))
    }

    fn begin(&mut self) -> Result<ExportFormat> {
        match self.state {
            ExportState::FormatSelected(format) => {
                self.transition(ExportState::Exporting(format));
                Ok(format)
            }
            ExportState::Exporting(_) => Err(Error::ExportInProgress),
            other => Err(Error::InvalidState {
                action: "export".to_string(),
                state: other.to_string(),
            }),
        }
    }

    fn finish(
        &mut self,
        format: ExportFormat,
        subject: Result<ExportSubject>,
    ) -> Result<ExportArtifact> {
        match subject.and_then(|subject| self.produce(format, &subject)) {
            Ok(artifact) => {
                self.transition(ExportState::Done);
                info!(
                    filename = %artifact.filename,
                    mime = %artifact.mime,
                    bytes = artifact.content.len(),
                    "Export delivered"
                );
                Ok(artifact)
            }
            Err(e) => {
                warn!(format = format.as_str(), code = e.error_code().as_str(), "Export failed");
                self.transition(ExportState::Failed);
                self.transition(ExportState::Idle);
                Err(e)
            }
        }
    }

    fn produce(&mut self, format: ExportFormat, subject: &ExportSubject) -> Result<ExportArtifact> {
        let content = serialize(subject, format)?;
        let sink = &self.sink;
        let filename = self
            .filenames
            .filename_avoiding(format, subject.kind(), |name| sink.is_taken(name));
        let artifact = ExportArtifact {
            content,
            filename,
            mime: format.mime_kind(),
        };

        self.sink
            .deliver(&artifact)
            .map_err(|e| Error::ExportIoFailed {
                filename: artifact.filename.clone(),
                reason: format!("{e:#}"),
            })?;
        Ok(artifact)
    }

    // ── QR sharing ───────────────────────────────────────────

    /// Single QR payload for the profile.
    ///
    /// # Errors
    ///
    /// `ProfileNotFound`, `QrPayloadTooLarge`, or `ExportInProgress`.
    pub fn qr_for_profile(&self) -> Result<String> {
        self.ensure_not_exporting()?;
        let profile = self.load_profile()?;
        encode_for_qr(&ExportSubject::Profile(profile), self.qr_budget)
    }

    /// Single QR payload for one contact.
    ///
    /// # Errors
    ///
    /// `ContactNotFound`, `QrPayloadTooLarge`, or `ExportInProgress`.
    pub fn qr_for_contact(&self, id: &str) -> Result<String> {
        self.ensure_not_exporting()?;
        let contact = self.load_contact(id)?;
        encode_for_qr(&ExportSubject::Single(contact), self.qr_budget)
    }

    /// Batch QR payloads for the contacts matching `criteria`.
    ///
    /// Unlike file export, empty criteria are refused: the whole address
    /// book is never shared as QR codes.
    ///
    /// # Errors
    ///
    /// - `FiltersRequired` if no filter or search term is active
    /// - `NoMatchingContacts` if the criteria select nothing
    /// - `QrPayloadTooLarge` if a selected contact cannot fit any payload
    /// - `ExportInProgress` while a file export is running
    pub fn qr_for_contacts(&self, criteria: &Criteria) -> Result<Vec<String>> {
        self.ensure_not_exporting()?;
        if criteria.is_empty() {
            debug!(state = %self.state, "QR batch refused without filters");
            return Err(Error::FiltersRequired);
        }

        let selected = select_owned(self.load_contacts()?, criteria);
        if selected.is_empty() {
            return Err(Error::NoMatchingContacts);
        }

        let payloads = encode_batch_for_qr(&selected, self.qr_budget)?;
        info!(
            contacts = selected.len(),
            payloads = payloads.len(),
            "QR batch ready"
        );
        Ok(payloads)
    }

    // ── Store access ─────────────────────────────────────────

    fn load_profile(&self) -> Result<UserProfile> {
        self.profile
            .load_profile()
            .map_err(store_error)?
            .ok_or(Error::ProfileNotFound)
    }

    fn load_contact(&self, id: &str) -> Result<Contact> {
        self.contacts
            .load_contact(id)
            .map_err(store_error)?
            .ok_or_else(|| Error::ContactNotFound { id: id.to_string() })
    }

    fn load_contacts(&self) -> Result<Vec<Contact>> {
        self.contacts.load_contacts().map_err(store_error)
    }

    fn ensure_not_exporting(&self) -> Result<()> {
        if matches!(self.state, ExportState::Exporting(_)) {
            return Err(Error::ExportInProgress);
        }
        Ok(())
    }

    fn transition(&mut self, next: ExportState) {
        debug!(from = %self.state, to = %next, "Export state change");
        self.state = next;
    }
}

fn select_owned(contacts: Vec<Contact>, criteria: &Criteria) -> Vec<Contact> {
    contacts.into_iter().filter(|c| criteria.matches(c)).collect()
}

fn store_error(e: anyhow::Error) -> Error {
    Error::Store(format!("{e:#}"))
}
