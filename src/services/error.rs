use thiserror::Error;

use crate::application::error::UploadError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error {code}: {message}")]
    ServerError { code: u16, message: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<ClientError> for UploadError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::NetworkError(msg) => UploadError::Network(msg),
            ClientError::ServerError { code, message } => UploadError::Server { code, message },
            ClientError::InvalidConfig(msg) => {
                UploadError::Network(format!("Client misconfigured: {}", msg))
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            ClientError::NetworkError(format!("Connection failed: {}", error))
        } else if let Some(status) = error.status() {
            ClientError::ServerError {
                code: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_builder() {
            ClientError::InvalidConfig(error.to_string())
        } else {
            ClientError::NetworkError(error.to_string())
        }
    }
}
