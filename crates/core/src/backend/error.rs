use thiserror::Error;

/// Errors reported by calendar backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Backend does not support {0}")]
    Unsupported(&'static str),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl BackendError {
    pub fn calendar_not_found(uri: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity_type: "Calendar",
            id: uri.into(),
        }
    }

    pub fn object_not_found(uri: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity_type: "Object",
            id: uri.into(),
        }
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
