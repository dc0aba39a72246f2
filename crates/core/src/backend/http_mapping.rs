//! Pure functions for mapping business-layer failures to HTTP status codes.

use super::BackendError;

/// Maps a [`BackendError`] to an HTTP status code.
///
/// Every failure is reported as 400 (Bad Request), including `NotFound`,
/// which existing clients rely on. With `not_found_as_404` set, `NotFound`
/// maps to 404 instead.
///
/// # Examples
///
/// ```
/// use calbridge_core::backend::{backend_error_to_status_code, BackendError};
///
/// let error = BackendError::calendar_not_found("work");
/// assert_eq!(backend_error_to_status_code(&error, false), 400);
/// assert_eq!(backend_error_to_status_code(&error, true), 404);
/// ```
pub fn backend_error_to_status_code(error: &BackendError, not_found_as_404: bool) -> u16 {
    match error {
        BackendError::NotFound { .. } if not_found_as_404 => 404,
        BackendError::NotFound { .. }
        | BackendError::AlreadyExists { .. }
        | BackendError::Unsupported(_)
        | BackendError::InvalidData(_) => 400,
    }
}
