//! Command implementations.

pub mod completions;
pub mod export;
pub mod import;
pub mod qr;
pub mod scan;
pub mod version;

use std::path::Path;

use crate::config::resolve_book_path;
use crate::error::{Error, Result};
use crate::export::AddressBookFile;

/// Open the address book named by `--book`, or the default one.
pub(crate) fn open_book(explicit: Option<&Path>) -> Result<AddressBookFile> {
    let path = resolve_book_path(explicit)?;
    AddressBookFile::open(path).map_err(|e| Error::Store(format!("{e:#}")))
}
