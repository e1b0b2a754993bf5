//! Error types for the littlegarden application.
//!
//! The calendar and record-store transformations never fail; these variants
//! cover argument parsing, configuration, the editor round-trip and the
//! persistence boundary.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the littlegarden application.
#[derive(Error, Debug)]
pub enum GardenError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A date argument or stored key was not a real `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{input}'. Expected YYYY-MM-DD or 'today'")]
    InvalidDate { input: String },

    /// A month argument was not a real `YYYY-MM` month.
    #[error("Invalid month '{input}'. Expected YYYY-MM")]
    InvalidMonth { input: String },

    /// Unknown flower type.
    #[error("Invalid note type '{input}'. Expected positive (red) or needs-work (blue)")]
    InvalidNoteType { input: String },

    /// Note content was empty after trimming.
    #[error("Nothing to plant: note content is empty")]
    EmptyContent,

    /// Navigation left the range of displayable months.
    #[error("Month out of range: only years {min_year} to {max_year} can be shown")]
    MonthOutOfRange { min_year: i32, max_year: i32 },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },
}
