use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    application::{error::UploadError, services::UploadClient},
    domain::{
        config::UploadConfig,
        models::{file::DEFAULT_MIME_TYPE, SelectedFile, UploadReceipt},
    },
    services::error::ClientError,
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Posts files as multipart form data to the configured endpoint.
pub struct HttpUploadClient {
    client: Client,
    endpoint: String,
    field_name: String,
}

impl HttpUploadClient {
    pub fn new(config: &UploadConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            field_name: config.field_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn file_part(&self, file: &SelectedFile) -> Result<multipart::Part, ClientError> {
        let part = || {
            multipart::Part::bytes(file.content.clone()).file_name(file.filename.clone())
        };

        part().mime_str(&file.mime_type).or_else(|e| {
            warn!(
                "Unusable MIME type {:?} for {}: {}, sending as {}",
                file.mime_type, file.filename, e, DEFAULT_MIME_TYPE
            );
            part()
                .mime_str(DEFAULT_MIME_TYPE)
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))
        })
    }

    async fn post(&self, file: &SelectedFile) -> Result<UploadReceipt, ClientError> {
        let form = multipart::Form::new().part(self.field_name.clone(), self.file_part(file)?);

        debug!("POST {} ({} bytes)", self.endpoint, file.size());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from)?;

        let status = response.status();

        if !status.is_success() {
            // The status alone decides the failure; a broken error body only
            // costs the server's message.
            let body = response.text().await.unwrap_or_default();
            let message = server_message(&body)
                .unwrap_or_else(|| format!("Upload failed with status {}", status.as_u16()));
            return Err(ClientError::ServerError {
                code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(ClientError::from)?;
        Ok(UploadReceipt::new(status.as_u16(), parse_payload(&body)))
    }
}

#[async_trait]
impl UploadClient for HttpUploadClient {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt, UploadError> {
        Ok(self.post(file).await?)
    }
}

/// Pulls `error` or `message` out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|message| !message.trim().is_empty())
}

/// Success bodies are expected to be JSON; anything else is kept as text.
fn parse_payload(body: &str) -> Value {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_message_prefers_error_field() {
        assert_eq!(
            server_message(r#"{"error":"File too large","message":"ignored"}"#),
            Some("File too large".to_string())
        );
        assert_eq!(
            server_message(r#"{"message":"bad request"}"#),
            Some("bad request".to_string())
        );
    }

    #[test]
    fn server_message_absent_for_non_json_or_blank() {
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"error":"  "}"#), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn payload_parsing_is_lenient() {
        assert_eq!(parse_payload(r#"{"url":"x"}"#), json!({ "url": "x" }));
        assert_eq!(parse_payload("  "), Value::Null);
        assert_eq!(parse_payload("stored\n"), json!("stored"));
    }

    #[test]
    fn endpoint_comes_from_config() {
        let client = HttpUploadClient::new(&UploadConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/upload");
    }
}
