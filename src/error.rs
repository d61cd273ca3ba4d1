//! Error types for ContactShare.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=shape, 3=not_found, 4=validation, etc.)
//! - Retryability flags so callers know whether a second attempt makes sense
//! - User-facing recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for ContactShare operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. UI layers match on the string; shell scripts on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Data shape (exit 2)
    UnsupportedDataShape,

    // Not Found (exit 3)
    ContactNotFound,
    ProfileNotFound,
    NoMatchingContacts,

    // Validation (exit 4)
    FiltersRequired,
    InvalidArgument,
    InvalidState,
    ExportInProgress,

    // QR (exit 5)
    QrPayloadTooLarge,
    QrDecodeFailed,

    // Export / store I/O (exit 6)
    ExportIoFailed,
    StoreError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,
    CsvError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::UnsupportedDataShape => "UNSUPPORTED_DATA_SHAPE",
            Self::ContactNotFound => "CONTACT_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::NoMatchingContacts => "NO_MATCHING_CONTACTS",
            Self::FiltersRequired => "FILTERS_REQUIRED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidState => "INVALID_STATE",
            Self::ExportInProgress => "EXPORT_IN_PROGRESS",
            Self::QrPayloadTooLarge => "QR_PAYLOAD_TOO_LARGE",
            Self::QrDecodeFailed => "QR_DECODE_FAILED",
            Self::ExportIoFailed => "EXPORT_IO_FAILED",
            Self::StoreError => "STORE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::CsvError => "CSV_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::UnsupportedDataShape => 2,
            Self::ContactNotFound | Self::ProfileNotFound | Self::NoMatchingContacts => 3,
            Self::FiltersRequired
            | Self::InvalidArgument
            | Self::InvalidState
            | Self::ExportInProgress => 4,
            Self::QrPayloadTooLarge | Self::QrDecodeFailed => 5,
            Self::ExportIoFailed | Self::StoreError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::CsvError => 8,
        }
    }

    /// Whether the same gesture may succeed if retried, possibly with
    /// corrected input (another filter, another scan, a second save attempt).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::FiltersRequired
                | Self::NoMatchingContacts
                | Self::InvalidArgument
                | Self::ExportInProgress
                | Self::QrDecodeFailed
                | Self::ExportIoFailed
                | Self::StoreError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while exporting, sharing or scanning records.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported data shape: cannot produce {target} from {shape}")]
    UnsupportedDataShape { shape: String, target: String },

    #[error("QR payload too large: {size} characters exceeds the {budget}-character budget")]
    QrPayloadTooLarge { size: usize, budget: usize },

    #[error("QR decode failed: {reason}")]
    QrDecodeFailed { reason: String },

    #[error("Filters required: set a filter or search term before exporting contacts as QR codes")]
    FiltersRequired,

    #[error("No contacts match the active filters")]
    NoMatchingContacts,

    #[error("Export failed while saving {filename}: {reason}")]
    ExportIoFailed { filename: String, reason: String },

    #[error("Contact not found: {id}")]
    ContactNotFound { id: String },

    #[error("No profile has been saved yet")]
    ProfileNotFound,

    #[error("Store error: {0}")]
    Store(String),

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Invalid export state: cannot {action} while {state}")]
    InvalidState { action: String, state: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a decode failure with a short reason.
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::QrDecodeFailed {
            reason: reason.into(),
        }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedDataShape { .. } => ErrorCode::UnsupportedDataShape,
            Self::QrPayloadTooLarge { .. } => ErrorCode::QrPayloadTooLarge,
            Self::QrDecodeFailed { .. } => ErrorCode::QrDecodeFailed,
            Self::FiltersRequired => ErrorCode::FiltersRequired,
            Self::NoMatchingContacts => ErrorCode::NoMatchingContacts,
            Self::ExportIoFailed { .. } => ErrorCode::ExportIoFailed,
            Self::ContactNotFound { .. } => ErrorCode::ContactNotFound,
            Self::ProfileNotFound => ErrorCode::ProfileNotFound,
            Self::Store(_) => ErrorCode::StoreError,
            Self::ExportInProgress => ErrorCode::ExportInProgress,
            Self::InvalidState { .. } => ErrorCode::InvalidState,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Csv(_) => ErrorCode::CsvError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// User-facing recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::FiltersRequired => Some(
                "Narrow the selection first, e.g. --country France or --search smith. \
                 Exporting the whole address book as QR codes is not supported."
                    .to_string(),
            ),
            Self::NoMatchingContacts => {
                Some("Loosen the filters or clear the search term and try again.".to_string())
            }
            Self::QrPayloadTooLarge { .. } => Some(
                "Name, job, phone and email alone do not fit in one QR code. \
                 Share this record as a JSON or text file instead."
                    .to_string(),
            ),
            Self::QrDecodeFailed { .. } => Some(
                "The scanned code is not a ContactShare payload. Scan again or add the contact manually."
                    .to_string(),
            ),
            Self::ContactNotFound { id } => Some(format!(
                "No contact with ID '{id}'. Use `cshare export contacts --format text` to list contacts."
            )),
            Self::ProfileNotFound => {
                Some("Fill in your profile before exporting or sharing it.".to_string())
            }
            Self::ExportIoFailed { .. } => {
                Some("Check that the export directory exists and is writable, then retry.".to_string())
            }
            Self::ExportInProgress => {
                Some("Wait for the current export to finish before starting another.".to_string())
            }
            Self::UnsupportedDataShape { .. }
            | Self::Store(_)
            | Self::InvalidState { .. }
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Csv(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
