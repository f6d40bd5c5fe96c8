use std::sync::Arc;

use crate::{application::services::UploadMachine, domain::config::UploadConfig};

/// Everything the shell callbacks need, cheap to clone.
#[derive(Clone)]
pub struct ShellState {
    pub config: Arc<UploadConfig>,
    pub machine: UploadMachine,
}

impl ShellState {
    pub fn new(config: UploadConfig, machine: UploadMachine) -> Self {
        Self {
            config: Arc::new(config),
            machine,
        }
    }
}
