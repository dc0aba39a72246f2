use thiserror::Error;

/// Errors raised while reading or identifying calendars.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Could not parse calendar: {0}")]
    Parse(String),
    #[error("Invalid calendar identifier: {0}")]
    InvalidIdentifier(String),
}
