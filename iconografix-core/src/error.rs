//! Error types surfaced by the catalog core
//!
//! Data-source failures (manifest or content fetches) are recovered inside the
//! providers and never show up here. What remains are configuration-class
//! problems the caller has to fix.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned to callers of the catalog core
#[derive(Error, Debug)]
pub enum CatalogError {
    /// search/random was called before any provider was made active
    #[error("No active provider selected")]
    NoActiveProvider,

    /// A provider id that was never registered
    #[error("Provider not found: {id}")]
    UnknownProvider { id: String },

    /// Two providers registered under the same id
    #[error("Provider already registered: {id}")]
    DuplicateProvider { id: String },

    /// Failure while encoding or dispatching a message to the host
    #[error("Host messaging failed: {message}")]
    HostMessaging { message: String },

    /// Invalid configuration values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Failed to read a configuration file
    #[error("Failed to read configuration from {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file
    #[error("Failed to parse configuration from {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn host(message: impl Into<String>) -> Self {
        Self::HostMessaging {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
