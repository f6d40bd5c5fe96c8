use tracing::{error, warn};

use crate::{application::error::ValidationError, domain::models::FailureReason};

/// Text shown to the user in place of the underlying error.
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for FailureReason {
    fn user_message(&self) -> String {
        match self {
            FailureReason::Network { message } => {
                warn!("Upload did not reach the server: {}", message);
                "Could not reach the upload server. Check your connection and try again."
                    .to_string()
            }
            FailureReason::Server { code, message } if (400..500).contains(code) => {
                warn!("Upload rejected with {}: {}", code, message);
                format!("Upload rejected: {}", message)
            }
            FailureReason::Server { code, message } => {
                error!("Upload server error {}: {}", code, message);
                format!("The server failed to store the file ({}): {}", code, message)
            }
        }
    }
}

impl UserMessage for ValidationError {
    fn user_message(&self) -> String {
        match self {
            ValidationError::MissingFile => "Please choose a file to upload.".to_string(),
            ValidationError::EmptyFile(name) => {
                format!("{} is empty. Please choose another file.", name)
            }
            ValidationError::TooLarge { size, max } => format!(
                "That file is {} bytes; the limit is {} bytes. Please choose a smaller file.",
                size, max
            ),
            ValidationError::TypeNotAllowed(mime_type) => format!(
                "Files of type {} are not accepted. Please choose another file.",
                mime_type
            ),
            ValidationError::Unreadable(path) => format!(
                "{} could not be read. Check that it exists and is a readable file, then choose it again.",
                path
            ),
        }
    }
}
