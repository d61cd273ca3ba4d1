//! File-backed collaborators used by the command-line binary.
//!
//! - [`AddressBookFile`]: profile and contacts from one JSON document
//! - [`DirectorySink`]: writes each artifact into a directory atomically

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::collab::{ContactStore, ExportSink, ProfileStore};
use crate::export::ExportArtifact;
use crate::model::{Contact, UserProfile};

/// On-disk address book: `{ "profile": {...}, "contacts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    pub contacts: Vec<Contact>,
}

/// Address book snapshot read once from a JSON file.
#[derive(Debug, Clone)]
pub struct AddressBookFile {
    path: PathBuf,
    book: AddressBook,
}

impl AddressBookFile {
    /// Read and parse the address book at `path`.
    ///
    /// A missing file is an empty address book.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let book = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading address book {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing address book {}", path.display()))?
        } else {
            debug!(path = %path.display(), "Address book not found, starting empty");
            AddressBook::default()
        };
        Ok(Self { path, book })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Append contacts and write the book back.
    ///
    /// # Errors
    ///
    /// Returns an error if the book cannot be serialized or written.
    pub fn add_contacts(&mut self, contacts: impl IntoIterator<Item = Contact>) -> anyhow::Result<usize> {
        let before = self.book.contacts.len();
        self.book.contacts.extend(contacts);
        let json = serde_json::to_string_pretty(&self.book)?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("writing address book {}", self.path.display()))?;
        Ok(self.book.contacts.len() - before)
    }
}

impl ContactStore for AddressBookFile {
    fn load_contact(&self, id: &str) -> anyhow::Result<Option<Contact>> {
        Ok(self.book.contacts.iter().find(|c| c.id == id).cloned())
    }

    fn load_contacts(&self) -> anyhow::Result<Vec<Contact>> {
        Ok(self.book.contacts.clone())
    }
}

impl ProfileStore for AddressBookFile {
    fn load_profile(&self) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.book.profile.clone())
    }
}

/// Saves artifacts as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> anyhow::Result<()> {
        // Filenames come from FilenameGenerator, but never trust a path here.
        let name = Path::new(&artifact.filename)
            .file_name()
            .filter(|n| n.to_string_lossy() == artifact.filename)
            .with_context(|| format!("refusing unsafe filename {:?}", artifact.filename))?;

        let path = self.dir.join(name);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        atomic_write(&path, &artifact.content)
            .with_context(|| format!("writing {}", path.display()))?;

        debug!(path = %path.display(), mime = %artifact.mime, "Wrote export file");
        self.written.push(path);
        Ok(())
    }

    fn is_taken(&self, filename: &str) -> bool {
        self.dir.join(filename).exists()
    }
}

/// Write `content` to `path` via a temp file, fsync and rename.
///
/// Readers see either the old file or the complete new one.
///
/// # Errors
///
/// Returns an error if any step fails.
pub fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MimeKind;
    use tempfile::TempDir;

    fn artifact(filename: &str) -> ExportArtifact {
        ExportArtifact {
            content: "{\"kind\":\"contacts\",\"data\":[]}".to_string(),
            filename: filename.to_string(),
            mime: MimeKind::Json,
        }
    }

    #[test]
    fn test_atomic_write_creates_dirs_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("out.json");

        atomic_write(&path, "hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert!(!temp.path().join("nested").join("out.json.tmp").exists());
    }

    #[test]
    fn test_directory_sink_writes_artifact() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path().join("exports"));

        sink.deliver(&artifact("contactshare_contacts_20250120_103000.json"))
            .unwrap();

        assert_eq!(sink.written().len(), 1);
        let written = fs::read_to_string(&sink.written()[0]).unwrap();
        assert!(written.contains("\"contacts\""));
    }

    #[test]
    fn test_directory_sink_refuses_overwrite_and_traversal() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path());

        sink.deliver(&artifact("a.json")).unwrap();
        assert!(sink.deliver(&artifact("a.json")).is_err());
        assert!(sink.deliver(&artifact("../escape.json")).is_err());
        assert!(!temp.path().parent().unwrap().join("escape.json").exists());
    }

    #[test]
    fn test_directory_sink_reports_existing_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("left_over.csv"), "x").unwrap();
        let mut sink = DirectorySink::new(temp.path());

        assert!(sink.is_taken("left_over.csv"));
        assert!(!sink.is_taken("b.json"));
        sink.deliver(&artifact("b.json")).unwrap();
        assert!(sink.is_taken("b.json"));
    }

    #[test]
    fn test_address_book_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("book.json");

        let empty = AddressBookFile::open(&path).unwrap();
        assert!(empty.load_contacts().unwrap().is_empty());
        assert!(empty.load_profile().unwrap().is_none());

        let mut book = empty;
        let contact = Contact::new("Ada", "Lovelace");
        let id = contact.id.clone();
        assert_eq!(book.add_contacts([contact]).unwrap(), 1);

        let reopened = AddressBookFile::open(&path).unwrap();
        let loaded = reopened.load_contact(&id).unwrap().unwrap();
        assert_eq!(loaded.first_name, "Ada");
        assert!(reopened.load_contact("missing").unwrap().is_none());
    }

    #[test]
    fn test_address_book_parse_error_has_context() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("book.json");
        fs::write(&path, "not json").unwrap();

        let err = AddressBookFile::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing address book"));
    }
}
