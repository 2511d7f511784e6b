use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// Backing identity data exists but carries no usable id.
    #[error("{source_name} record for '{requested}' has no user id")]
    MissingIdentifier {
        requested: String,
        source_name: &'static str,
    },

    #[error("Identity store error: {message}")]
    Store { message: String },

    #[error("Export error: {message}")]
    Export { message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn missing_identifier(requested: impl Into<String>, source_name: &'static str) -> Self {
        Self::MissingIdentifier {
            requested: requested.into(),
            source_name,
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}
