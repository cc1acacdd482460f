//! Error types for hrdesk.
//!
//! This module defines all error types used throughout the hrdesk crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::workload::WorkloadError;

/// The main error type for hrdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or read the dataset file.
    #[error("failed to open dataset at {path}: {source}")]
    StorageOpen {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Refused to create a dataset over an existing file.
    #[error("dataset already exists at {path}")]
    StorageExists {
        /// Path to the dataset file.
        path: PathBuf,
    },

    /// Another writer held the dataset lock for too long.
    #[error("timed out waiting for dataset lock {path}")]
    LockTimeout {
        /// Path to the lock file.
        path: PathBuf,
    },

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn {
        /// Header name of the missing column.
        column: &'static str,
    },

    /// A hire date cell could not be parsed.
    #[error("row {row}: unparseable hire date '{value}'")]
    InvalidDate {
        /// 1-based data row number (header excluded).
        row: usize,
        /// The raw cell content.
        value: String,
    },

    /// A numeric, workload or seniority cell could not be parsed.
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidField {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Header name of the column.
        column: &'static str,
        /// The raw cell content.
        value: String,
    },

    // === Input Errors ===
    /// A workload value was malformed or out of range.
    #[error("invalid workload: {0}")]
    Workload(#[from] WorkloadError),

    /// A submitted record failed form validation.
    #[error("{message}")]
    Validation {
        /// User-facing validation message.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for hrdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new form validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid field error for a dataset cell.
    #[must_use]
    pub fn invalid_field(row: usize, column: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            row,
            column,
            value: value.into(),
        }
    }

    /// Check if this error means the dataset file could not be opened.
    #[must_use]
    pub fn is_storage_open(&self) -> bool {
        matches!(self, Self::StorageOpen { .. })
    }

    /// Check if this error is a rejected form submission.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error stems from malformed input data.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Workload(_)
                | Self::InvalidDate { .. }
                | Self::InvalidField { .. }
                | Self::MissingColumn { .. }
                | Self::Csv(_)
        )
    }
}
