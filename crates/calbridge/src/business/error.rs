use thiserror::Error;

use calbridge_core::backend::{backend_error_to_status_code, BackendError};
use calbridge_core::calendar::CalendarError;

/// Failures of business-layer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusinessLayerError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
    #[error("Calendar URI cannot change from {from} to {to}")]
    UriChange { from: String, to: String },
}

impl BusinessLayerError {
    /// HTTP status code for this failure.
    ///
    /// Everything is a 400 unless `not_found_as_404` is set and a backend
    /// reported a missing calendar or object.
    pub fn status_code(&self, not_found_as_404: bool) -> u16 {
        match self {
            BusinessLayerError::Backend(error) => {
                backend_error_to_status_code(error, not_found_as_404)
            }
            BusinessLayerError::Calendar(_)
            | BusinessLayerError::UnknownBackend(_)
            | BusinessLayerError::UriChange { .. } => 400,
        }
    }
}

/// Result type for business-layer operations.
pub type Result<T> = std::result::Result<T, BusinessLayerError>;
