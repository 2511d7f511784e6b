use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueUserError {
    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("Identity data for '{requested}' has no user id")]
    MissingIdentifier { requested: String },

    #[error("Internal error")]
    Internal,
}

impl BlueUserError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn missing_identifier(requested: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            requested: requested.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for BlueUserError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            MissingIdentifier { requested, .. } => Self::missing_identifier(requested),
            Store { .. } | Export { .. } => Self::internal(),
        }
    }
}
