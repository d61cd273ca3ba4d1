//! Export orchestration.
//!
//! The orchestrator owns the export sheet's state machine and calls out to
//! three collaborators it is given at construction: a contact store, a
//! profile store and a sink that saves or shares the finished artifact.
//! File-backed implementations of all three live in [`file`].

pub mod collab;
pub mod file;
mod orchestrator;

pub use collab::{ContactStore, ExportSink, ProfileStore};
pub use file::{AddressBook, AddressBookFile, DirectorySink};
pub use orchestrator::{ExportArtifact, ExportOrchestrator, ExportState};
