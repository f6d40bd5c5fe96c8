use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
pub const DEFAULT_FIELD_NAME: &str = "file";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constraints a file must satisfy before it can be selected.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ValidationRules {
    #[serde(rename = "maxSizeBytes", default)]
    pub max_size_bytes: Option<u64>,
    #[serde(rename = "allowedTypes", default)]
    pub allowed_types: Option<Vec<String>>,
}

/// Process-wide upload settings, built once at startup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "uploadPath")]
    pub upload_path: String,
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub rules: ValidationRules,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rules: ValidationRules::default(),
        }
    }
}

impl UploadConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL the file is posted to.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.upload_path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
