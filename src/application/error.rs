use thiserror::Error;

use crate::domain::models::FailureReason;

/// Why a file was refused at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No file selected")]
    MissingFile,

    #[error("File is empty: {0}")]
    EmptyFile(String),

    #[error("File too large: {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("File type not allowed: {0}")]
    TypeNotAllowed(String),

    #[error("Cannot read file: {0}")]
    Unreadable(String),
}

/// Errors surfaced by an [`UploadClient`](crate::application::services::UploadClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {code}: {message}")]
    Server { code: u16, message: String },
}

impl From<UploadError> for FailureReason {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Network(message) => FailureReason::Network { message },
            UploadError::Server { code, message } => FailureReason::Server { code, message },
        }
    }
}
