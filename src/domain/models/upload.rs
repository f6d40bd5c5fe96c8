use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Payload fields that commonly carry a reference to the stored artifact.
const REFERENCE_FIELDS: [&str; 5] = ["url", "cid", "id", "fileId", "txHash"];

/// Lifecycle of the single upload attempt owned by the state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Selected,
    Uploading,
    Succeeded(UploadReceipt),
    Failed(FailureReason),
}

impl UploadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Selected => "selected",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Succeeded(_) => "succeeded",
            UploadStatus::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Succeeded(_) | UploadStatus::Failed(_))
    }
}

/// What the server sent back for a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub payload: Value,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(rename = "receivedAt")]
    pub received_at: DateTime<Utc>,
}

impl UploadReceipt {
    pub fn new(status_code: u16, payload: Value) -> Self {
        Self {
            payload,
            status_code,
            received_at: Utc::now(),
        }
    }

    pub fn reference(&self) -> Option<&str> {
        REFERENCE_FIELDS
            .iter()
            .find_map(|field| self.payload.get(field).and_then(Value::as_str))
    }
}

/// Classified reason an upload attempt ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server error {code}: {message}")]
    Server { code: u16, message: String },
}

impl FailureReason {
    pub fn network(message: impl Into<String>) -> Self {
        FailureReason::Network {
            message: message.into(),
        }
    }

    pub fn server(code: u16, message: impl Into<String>) -> Self {
        FailureReason::Server {
            code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            FailureReason::Server { code, .. } => Some(*code),
            FailureReason::Network { .. } => None,
        }
    }
}
