use async_trait::async_trait;

use crate::{
    application::error::UploadError,
    domain::models::{SelectedFile, UploadReceipt},
};

/// Request/response boundary to the upload endpoint. One call, one request.
#[async_trait]
pub trait UploadClient: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt, UploadError>;
}
