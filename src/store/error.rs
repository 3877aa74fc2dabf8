//! # Store Errors

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Preference store closed")]
    ActorClosed,
    #[error("Preference store dropped response channel")]
    ActorDropped,
    #[error("Preference file error: {0}")]
    Io(String),
    #[error("Preference file is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
