use tracing::{info, warn};

use crate::{
    application::error::ValidationError,
    domain::{config::ValidationRules, models::SelectedFile},
};

/// Checks a picked file against the configured [`ValidationRules`].
#[derive(Debug, Clone, Default)]
pub struct FileSelectionHandler {
    rules: ValidationRules,
}

impl FileSelectionHandler {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Accepts `file` if it is present, non-empty, within the size limit and of
    /// an allowed type. Checks run in that order and the first failure wins.
    pub fn validate(&self, file: Option<SelectedFile>) -> Result<SelectedFile, ValidationError> {
        let file = file.ok_or_else(|| {
            warn!("Selection rejected: no file");
            ValidationError::MissingFile
        })?;

        if file.is_empty() {
            warn!("Selection rejected: {} is empty", file.filename);
            return Err(ValidationError::EmptyFile(file.filename));
        }

        if let Some(max) = self.rules.max_size_bytes {
            if file.size() > max {
                warn!(
                    "Selection rejected: {} is {} bytes, limit is {}",
                    file.filename,
                    file.size(),
                    max
                );
                return Err(ValidationError::TooLarge {
                    size: file.size(),
                    max,
                });
            }
        }

        if let Some(allowed) = &self.rules.allowed_types {
            if !allowed
                .iter()
                .any(|pattern| mime_matches(pattern, &file.mime_type))
            {
                warn!(
                    "Selection rejected: {} has type {}",
                    file.filename, file.mime_type
                );
                return Err(ValidationError::TypeNotAllowed(file.mime_type));
            }
        }

        info!(
            "File accepted: {} ({} bytes, {})",
            file.filename,
            file.size(),
            file.mime_type
        );
        Ok(file)
    }
}

/// Compares MIME essences case-insensitively; `type/*` matches any subtype.
fn mime_matches(pattern: &str, mime_type: &str) -> bool {
    let essence = |s: &str| s.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    let pattern = essence(pattern);
    let mime_type = essence(mime_type);

    match pattern.strip_suffix("/*") {
        Some(top_level) => mime_type
            .split_once('/')
            .is_some_and(|(kind, _)| kind == top_level),
        None => pattern == mime_type,
    }
}
