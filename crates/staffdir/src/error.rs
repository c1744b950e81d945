//! Error types for staffdir.
//!
//! Every fallible library operation returns [`Result`]. Views turn these into
//! the short user-facing strings they display and log the underlying error.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for staffdir operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Remote API Errors ===
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status} for {url}: {body}")]
    ApiStatus {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // === Storage Errors ===
    /// Failed to open or create the local storage database.
    #[error("failed to open local storage at {path}: {source}")]
    StorageOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A local storage query failed.
    #[error("local storage query failed: {0}")]
    StorageQuery(#[from] rusqlite::Error),

    /// Failed to run storage migrations.
    #[error("local storage migration failed: {message}")]
    StorageMigration {
        /// Description of what went wrong.
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
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for staffdir operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a transport error for a request to `url`.
    #[must_use]
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Check if this error came from talking to the remote API.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::ApiStatus { .. } | Self::ClientBuild(_)
        )
    }

    /// Check if the API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiStatus { status: 404, .. })
    }
}
