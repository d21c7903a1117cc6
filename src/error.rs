//! Unified error taxonomy for the whole crate.
//!
//! Every operation surfaces failures directly as a typed [`Error`]; there is
//! no internal retry or recovery at this layer. Callers own backoff policy.

use std::path::PathBuf;

use crate::llm::providers::Provider;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes exposed by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or missing credential setup, ambiguous key configuration, or a
    /// missing required request parameter.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No credential configured for the provider at call time. Raised before
    /// any network I/O happens.
    #[error("no API key configured for provider `{provider}`")]
    Authentication { provider: Provider },

    /// Registry lookup miss.
    #[error("no registered model with id `{0}`")]
    ModelNotFound(String),

    /// Option rejected by the provider's allow-list.
    #[error("option `{option}` is not supported by provider `{provider}`")]
    UnsupportedOption { provider: Provider, option: String },

    /// The remote API rejected or errored on the request, returned a payload
    /// we could not interpret, or the connection failed.
    #[error("{provider} API error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Provider {
        provider: Provider,
        status: Option<u16>,
        message: String,
    },

    /// The provider did not respond within the configured window.
    #[error("{provider} request timed out after {seconds}s")]
    Timeout { provider: Provider, seconds: u64 },

    /// Local filesystem failure during archiving or storage transfers.
    #[error("filesystem error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive input is not a readable tar.gz stream.
    #[error("invalid archive: {0}")]
    ArchiveFormat(String),

    /// Cloud Storage or Secret Manager call failure.
    #[error("storage error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Storage {
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn provider(provider: Provider, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn provider_status(
        provider: Provider,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider,
            status: Some(status),
            message: message.into(),
        }
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn storage_status(status: u16, message: impl Into<String>) -> Self {
        Self::Storage {
            status: Some(status),
            message: message.into(),
        }
    }
}
