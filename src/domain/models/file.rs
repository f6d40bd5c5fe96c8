use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A file picked by the user, held in memory until it is uploaded or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub id: Uuid,
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub selected_at: DateTime<Utc>,
}

impl SelectedFile {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            filename,
            mime_type,
            selected_at: Utc::now(),
        }
    }

    /// Reads `path` from disk and guesses its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();

        Ok(Self::new(content, filename, mime_type))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            id: self.id,
            filename: self.filename.clone(),
            size: self.size(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Metadata-only view of a [`SelectedFile`], cheap to hand to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub id: Uuid,
    pub filename: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}
