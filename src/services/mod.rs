mod error;
mod http_upload_client;

pub use error::ClientError;
pub use http_upload_client::HttpUploadClient;

use std::sync::Arc;

use tracing::info;

use crate::{application::services::UploadClient, domain::config::UploadConfig};

pub fn create_upload_client(config: &UploadConfig) -> Result<Arc<dyn UploadClient>, ClientError> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(ClientError::InvalidConfig(format!(
            "Base URL must be http(s): {}",
            config.base_url
        )));
    }
    if config.timeout_secs == 0 {
        return Err(ClientError::InvalidConfig(
            "Timeout must be at least one second".to_string(),
        ));
    }

    let client = HttpUploadClient::new(config)?;
    info!("Upload endpoint: {}", client.endpoint());
    Ok(Arc::new(client))
}
