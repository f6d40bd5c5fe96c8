use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::{error::UploadError, services::UploadClient},
    domain::models::{FailureReason, SelectedFile, UploadReceipt},
};

/// Sends the selected file through the client and classifies the outcome.
#[derive(Clone)]
pub struct SubmissionHandler {
    client: Arc<dyn UploadClient>,
}

impl SubmissionHandler {
    pub fn new(client: Arc<dyn UploadClient>) -> Self {
        Self { client }
    }

    pub async fn submit(&self, file: &SelectedFile) -> Result<UploadReceipt, FailureReason> {
        info!("Uploading {} ({} bytes)", file.filename, file.size());

        match self.client.upload(file).await {
            Ok(receipt) => {
                info!(
                    "Upload of {} succeeded with status {}",
                    file.filename, receipt.status_code
                );
                Ok(receipt)
            }
            Err(err @ UploadError::Network(_)) => {
                warn!("Upload of {} failed: {}", file.filename, err);
                Err(err.into())
            }
            Err(err @ UploadError::Server { .. }) => {
                error!("Upload of {} rejected: {}", file.filename, err);
                Err(err.into())
            }
        }
    }
}
