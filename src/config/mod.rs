//! Configuration management.
//!
//! Export settings live in `~/.contactshare/config.json`:
//!
//! ```json
//! { "qrBudget": 2000, "filenamePrefix": "contactshare", "exportDir": "/home/me/exports" }
//! ```
//!
//! Every key is optional. The address book defaults to
//! `~/.contactshare/book.json`. Command-line flags win over both.
//!
//! Only the binary reads configuration; library code takes plain values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::export::file::atomic_write;
use crate::filename::DEFAULT_FILENAME_PREFIX;
use crate::qr::QrBudget;

/// Settings the binary feeds into the export core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub qr_budget: QrBudget,
    pub filename_prefix: String,
    /// `None` means `~/.contactshare/exports`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            qr_budget: QrBudget::default(),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            export_dir: None,
        }
    }
}

impl ExportSettings {
    /// Export directory, falling back to the global default.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no directory is configured and the home
    /// directory cannot be determined.
    pub fn resolved_export_dir(&self) -> Result<PathBuf> {
        match &self.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => global_contactshare_dir()
                .map(|d| d.join("exports"))
                .ok_or_else(no_home),
        }
    }
}

/// Global ContactShare directory (`~/.contactshare`).
#[must_use]
pub fn global_contactshare_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".contactshare"))
}

/// Config file path: the explicit one if given, else the global one.
///
/// # Errors
///
/// Returns `Config` if the home directory cannot be determined.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    global_contactshare_dir()
        .map(|d| d.join("config.json"))
        .ok_or_else(no_home)
}

/// Address book path: the explicit one if given, else the global one.
///
/// # Errors
///
/// Returns `Config` if the home directory cannot be determined.
pub fn resolve_book_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    global_contactshare_dir()
        .map(|d| d.join("book.json"))
        .ok_or_else(no_home)
}

/// Load settings. A missing file yields defaults.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed, or
/// holds an out-of-range QR budget.
pub fn load_settings(explicit: Option<&Path>) -> Result<ExportSettings> {
    let path = config_path(explicit)?;

    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(ExportSettings::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {}: {e}", path.display())))
}

/// Save settings, creating the directory if needed.
///
/// # Errors
///
/// Returns `Config` if the settings cannot be written.
pub fn save_settings(settings: &ExportSettings, explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit)?;

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

    atomic_write(&path, &content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))
}

fn no_home() -> Error {
    Error::Config("Could not determine home directory".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(Some(&temp.path().join("config.json"))).unwrap();
        assert_eq!(settings, ExportSettings::default());
        assert_eq!(settings.qr_budget.chars(), 2000);
        assert_eq!(settings.filename_prefix, "contactshare");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"qrBudget": 1200}"#).unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.qr_budget.chars(), 1200);
        assert_eq!(settings.filename_prefix, "contactshare");
        assert!(settings.export_dir.is_none());
    }

    #[test]
    fn test_bad_budget_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"qrBudget": 0}"#).unwrap();

        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");
        let settings = ExportSettings {
            qr_budget: QrBudget::new(900).unwrap(),
            filename_prefix: "team".to_string(),
            export_dir: Some(temp.path().join("out")),
        };

        save_settings(&settings, Some(&path)).unwrap();
        assert_eq!(load_settings(Some(&path)).unwrap(), settings);
        assert_eq!(settings.resolved_export_dir().unwrap(), temp.path().join("out"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let explicit = Path::new("/tmp/elsewhere/book.json");
        assert_eq!(resolve_book_path(Some(explicit)).unwrap(), explicit);
        assert_eq!(config_path(Some(explicit)).unwrap(), explicit);
    }
}
