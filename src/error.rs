//! Error types and handling for Stowage
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Stowage operations
#[derive(Error, Diagnostic, Debug)]
pub enum StowageError {
    // Rule errors
    #[error("Invalid match pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(stowage::rule::invalid_pattern),
        help("Group, name and version patterns are regular expressions matched over the full candidate string")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid module coordinate: {coordinate}")]
    #[diagnostic(
        code(stowage::rule::invalid_coordinate),
        help("Coordinates follow the format group:name or group:name:version")
    )]
    InvalidCoordinate { coordinate: String },

    // Manifest errors
    #[error("Manifest file not found: {path}")]
    #[diagnostic(code(stowage::manifest::not_found))]
    ManifestNotFound { path: String },

    #[error("Failed to read manifest file: {path}")]
    #[diagnostic(code(stowage::manifest::read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to parse manifest: {path}")]
    #[diagnostic(code(stowage::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(stowage::manifest::invalid))]
    ManifestInvalid { message: String },

    // Descriptor errors
    #[error("Failed to write bootstrap descriptor: {path}")]
    #[diagnostic(
        code(stowage::descriptor::write_failed),
        help("Check that the output directory exists and is writable")
    )]
    DescriptorWriteFailed { path: String, reason: String },

    // Staging errors
    #[error("Failed to copy '{source_path}' to '{destination}': {reason}")]
    #[diagnostic(code(stowage::staging::copy_failed))]
    FileCopyFailed {
        source_path: String,
        destination: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(stowage::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for StowageError {
    fn from(err: std::io::Error) -> Self {
        StowageError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StowageError {
    fn from(err: serde_yaml::Error) -> Self {
        StowageError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, StowageError>;
