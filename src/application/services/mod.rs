pub mod file_selection;
pub mod submission;
pub mod upload_client;
pub mod upload_machine;

pub use file_selection::FileSelectionHandler;
pub use submission::SubmissionHandler;
pub use upload_client::UploadClient;
pub use upload_machine::{Settled, UploadEvent, UploadMachine};
