use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::{
    adapters::error::UserMessage,
    application::services::UploadEvent,
    domain::models::{FailureReason, FileSummary, UploadStatus},
};

#[derive(Debug, Serialize)]
pub struct StatusDTO {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusDTO {
    pub fn new(status: &UploadStatus, file: Option<FileSummary>) -> Self {
        let mut dto = StatusDTO {
            status: status.label(),
            file,
            result: None,
            reference: None,
            completed_at: None,
            error: None,
            message: None,
        };

        match status {
            UploadStatus::Succeeded(receipt) => {
                dto.reference = receipt.reference().map(str::to_string);
                dto.completed_at = Some(receipt.received_at);
                dto.result = Some(receipt.payload.clone());
            }
            UploadStatus::Failed(reason) => {
                dto.message = Some(reason.user_message());
                dto.error = Some(reason.clone());
            }
            _ => {}
        }

        dto
    }

    /// One human-readable line.
    pub fn line(&self) -> String {
        let subject = self
            .file
            .as_ref()
            .map(|file| format!(" {} ({} bytes)", file.filename, file.size))
            .unwrap_or_default();

        let detail = match (&self.reference, &self.message) {
            (Some(reference), _) => format!(": {}", reference),
            (None, Some(message)) => format!(": {}", message),
            (None, None) => String::new(),
        };

        format!("[{}]{}{}", self.status, subject, detail)
    }
}

impl From<&UploadEvent> for StatusDTO {
    fn from(event: &UploadEvent) -> Self {
        StatusDTO::new(&event.status, event.file.clone())
    }
}
