pub mod upload;

pub use upload::{UploadConfig, ValidationRules};
