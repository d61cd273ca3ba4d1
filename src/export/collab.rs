//! Collaborator seams for the export orchestrator.
//!
//! Stores and sinks report failures as `anyhow::Error`; the orchestrator maps
//! them to `Error::Store` and `Error::ExportIoFailed` so callers only ever see
//! the crate's error type.

use crate::export::ExportArtifact;
use crate::model::{Contact, UserProfile};

/// Read access to saved contacts.
pub trait ContactStore {
    /// Look up one contact by ID. `Ok(None)` means it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_contact(&self, id: &str) -> anyhow::Result<Option<Contact>>;

    /// All saved contacts, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_contacts(&self) -> anyhow::Result<Vec<Contact>>;
}

/// Read access to the device owner's profile.
pub trait ProfileStore {
    /// `Ok(None)` means the profile has never been filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_profile(&self) -> anyhow::Result<Option<UserProfile>>;
}

/// Destination for a finished export (save dialog, share sheet, directory).
pub trait ExportSink {
    /// # Errors
    ///
    /// Returns an error if the artifact could not be delivered.
    fn deliver(&mut self, artifact: &ExportArtifact) -> anyhow::Result<()>;

    /// Whether the destination already holds something under `filename`.
    fn is_taken(&self, _filename: &str) -> bool {
        false
    }
}

impl<T: ContactStore + ?Sized> ContactStore for &T {
    fn load_contact(&self, id: &str) -> anyhow::Result<Option<Contact>> {
        (**self).load_contact(id)
    }

    fn load_contacts(&self) -> anyhow::Result<Vec<Contact>> {
        (**self).load_contacts()
    }
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn load_profile(&self) -> anyhow::Result<Option<UserProfile>> {
        (**self).load_profile()
    }
}

impl<T: ExportSink + ?Sized> ExportSink for &mut T {
    fn deliver(&mut self, artifact: &ExportArtifact) -> anyhow::Result<()> {
        (**self).deliver(artifact)
    }

    fn is_taken(&self, filename: &str) -> bool {
        (**self).is_taken(filename)
    }
}
