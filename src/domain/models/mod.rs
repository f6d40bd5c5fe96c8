pub mod file;
pub mod upload;

pub use file::{FileSummary, SelectedFile};
pub use upload::{FailureReason, UploadReceipt, UploadStatus};
