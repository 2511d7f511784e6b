use thiserror::Error;

/// Why an identity source refused to load an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The lookup key and the user id carried by the entry differ.
    #[error("{source_name} entry '{key}' carries user id '{id}'")]
    KeyMismatch {
        source_name: &'static str,
        key: String,
        id: String,
    },

    #[error("{source_name} already holds an entry for '{key}'")]
    DuplicateKey { source_name: &'static str, key: String },
}
