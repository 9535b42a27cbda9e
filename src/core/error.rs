//! Error types for the controller.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`ServiceError`] - Network/HTTP errors raised by the server adapters
//! - [`TransferError`] - Outcome of an upload transfer that did not succeed
//! - [`ControllerError`] - Operation-level failures shown to the user

use thiserror::Error;

use crate::models::{DirectoryPath, Notification};

/// Network/fetch-related errors for requests against the embedded server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (connection reset, CORS, etc.)
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Why an upload transfer ended without success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Cancelled by the user; never reported as an error.
    #[error("abort")]
    Aborted,
    #[error(transparent)]
    Failed(#[from] ServiceError),
}

/// Failure of one controller operation.
///
/// Each failure is terminal for the triggering operation only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Listing retrieval failed.
    #[error("Failed retrieving contents of \"{path}\"")]
    Fetch {
        path: DirectoryPath,
        #[source]
        source: ServiceError,
    },
    /// A non-aborted transfer failed.
    #[error("Failed uploading \"{file}\" to \"{path}\"")]
    Upload {
        file: String,
        path: DirectoryPath,
        #[source]
        source: ServiceError,
    },
    /// The install request was rejected or its redirect is unusable.
    #[error("Failed install \"{path}\"")]
    Install {
        path: String,
        #[source]
        source: ServiceError,
    },
}

impl ControllerError {
    fn source_error(&self) -> &ServiceError {
        match self {
            Self::Fetch { source, .. }
            | Self::Upload { source, .. }
            | Self::Install { source, .. } => source,
        }
    }

    /// Alert carrying the attempted path/file and the underlying reason.
    pub fn to_notification(&self) -> Notification {
        Notification::danger(format!("{}: ", self.source_error()), self.to_string())
    }
}
