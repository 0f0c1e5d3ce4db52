// Error types for IntelRun
//
// This module provides structured error types using thiserror. The CVE payload
// errors mirror the failure taxonomy of the NVD data model: malformed payloads,
// missing mandatory fields, missing optional data that was explicitly requested,
// and unsupported CVSS versions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for IntelRun operations
#[derive(Debug, Error)]
pub enum IntelError {
    /// Payload is empty or structurally unusable
    #[error("Malformed payload: {details}")]
    Malformed { details: String },

    /// A mandatory field is absent from the CVE payload
    #[error("Missing mandatory field in CVE payload: {field}")]
    MandatoryField { field: String },

    /// Requested optional data is not present in the record
    #[error("Requested data is missing: {details}")]
    MissingData { details: String },

    /// An unsupported CVSS version was requested
    #[error("Unsupported CVSS version: {version}")]
    UnsupportedVersion { version: String },

    /// Upstream returned a non-success HTTP status
    #[error("HTTP error (status {status}) from {url}")]
    HttpStatus { status: u16, url: String },

    /// Reqwest HTTP client errors
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Generic I/O error
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },

    /// File system errors that carry the offending path
    #[error("File system error: {path}: {source}")]
    FileSystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration or configuration file
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Invalid input from user or CLI arguments
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl IntelError {
    /// Shorthand for the malformed-payload case
    pub fn malformed(details: impl Into<String>) -> Self {
        IntelError::Malformed {
            details: details.into(),
        }
    }

    /// Shorthand for a missing mandatory field
    pub fn mandatory(field: impl Into<String>) -> Self {
        IntelError::MandatoryField {
            field: field.into(),
        }
    }

    /// Shorthand for requested-but-absent data
    pub fn missing(details: impl Into<String>) -> Self {
        IntelError::MissingData {
            details: details.into(),
        }
    }
}

/// Conversion from anyhow::Error for boundaries that still use it
impl From<anyhow::Error> for IntelError {
    fn from(err: anyhow::Error) -> Self {
        IntelError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for IntelError {
    fn from(err: toml::de::Error) -> Self {
        IntelError::ConfigError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_field_message() {
        let err = IntelError::mandatory("vulnerabilities");
        let msg = err.to_string();
        assert!(msg.contains("mandatory"));
        assert!(msg.contains("vulnerabilities"));
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = IntelError::UnsupportedVersion {
            version: "1.0".to_string(),
        };
        assert!(err.to_string().contains("1.0"));
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: IntelError = io_err.into();
        assert!(matches!(err, IntelError::IoError { .. }));
    }

    #[test]
    fn test_file_system_error_keeps_path() {
        use std::error::Error;

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = IntelError::FileSystemError {
            path: PathBuf::from("/tmp/files"),
            source: io_err,
        };

        assert!(err.to_string().contains("/tmp/files"));
        assert!(err.source().is_some());
    }
}
