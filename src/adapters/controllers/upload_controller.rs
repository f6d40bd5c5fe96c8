use std::path::Path;

use tracing::{info, warn};

use crate::{
    adapters::state::ShellState,
    application::{error::ValidationError, services::Settled},
    domain::models::{FileSummary, SelectedFile, UploadStatus},
};

/// Callbacks the shell wires to its picker, submit button and reset link.
pub struct UploadController;

impl UploadController {
    /// Reads the picked path and hands it to the machine. A path that cannot
    /// be read is rejected as [`ValidationError::Unreadable`].
    pub async fn select_path(
        state: &ShellState,
        path: Option<&Path>,
    ) -> Result<FileSummary, ValidationError> {
        let file = match path {
            Some(path) => match SelectedFile::from_path(path).await {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Cannot read {}: {}", path.display(), e);
                    let err = ValidationError::Unreadable(path.display().to_string());
                    return Err(state.machine.reject_selection(err));
                }
            },
            None => None,
        };

        let selected = state.machine.select_file(file)?;
        Ok(selected.summary())
    }

    /// Submits and waits for the attempt to settle, returning the status the
    /// machine ends up in.
    pub async fn submit(state: &ShellState) -> UploadStatus {
        let Some(handle) = state.machine.submit() else {
            return state.machine.status();
        };

        match handle.await {
            Ok(Settled::Applied(status)) => status,
            Ok(Settled::StaleResultIgnored) => state.machine.status(),
            Err(e) if e.is_cancelled() => {
                info!("Upload cancelled");
                state.machine.status()
            }
            Err(e) => {
                warn!("Upload task ended abnormally: {}", e);
                state.machine.status()
            }
        }
    }

    pub fn reset(state: &ShellState) -> UploadStatus {
        state.machine.reset();
        state.machine.status()
    }

    pub fn cancel(state: &ShellState) -> bool {
        state.machine.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::{
        application::{
            error::UploadError,
            services::{UploadClient, UploadMachine},
        },
        domain::{
            config::{UploadConfig, ValidationRules},
            models::UploadReceipt,
        },
    };

    struct EchoClient;

    #[async_trait]
    impl UploadClient for EchoClient {
        async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt, UploadError> {
            Ok(UploadReceipt::new(201, json!({ "id": file.filename })))
        }
    }

    fn shell(rules: ValidationRules) -> ShellState {
        let config = UploadConfig {
            rules,
            ..UploadConfig::default()
        };
        let machine = UploadMachine::from_config(&config, Arc::new(EchoClient));
        ShellState::new(config, machine)
    }

    #[tokio::test]
    async fn select_then_submit_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let state = shell(ValidationRules::default());

        let summary = UploadController::select_path(&state, Some(path.as_path()))
            .await
            .unwrap();
        assert_eq!(summary.filename, "notes.txt");
        assert_eq!(summary.mime_type, "text/plain");

        match UploadController::submit(&state).await {
            UploadStatus::Succeeded(receipt) => assert_eq!(receipt.reference(), Some("notes.txt")),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test]
    async fn nonexistent_path_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let state = shell(ValidationRules::default());

        let missing = dir.path().join("gone.txt");

        let err = UploadController::select_path(&state, Some(missing.as_path()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::Unreadable(missing.display().to_string())
        );
        assert_eq!(state.machine.status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn directory_path_clears_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let state = shell(ValidationRules::default());
        UploadController::select_path(&state, Some(path.as_path()))
            .await
            .unwrap();

        let err = UploadController::select_path(&state, Some(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, ValidationError::Unreadable(_)));
        assert_eq!(state.machine.status(), UploadStatus::Idle);
        assert!(state.machine.selected_file().is_none());
    }

    #[tokio::test]
    async fn no_path_is_a_missing_file() {
        let state = shell(ValidationRules::default());
        let err = UploadController::select_path(&state, None)
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingFile);
    }

    #[tokio::test]
    async fn disallowed_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let state = shell(ValidationRules {
            max_size_bytes: None,
            allowed_types: Some(vec!["image/*".to_string()]),
        });

        let err = UploadController::select_path(&state, Some(path.as_path()))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::TypeNotAllowed("text/plain".to_string()));
    }

    #[tokio::test]
    async fn submit_without_selection_reports_idle() {
        let state = shell(ValidationRules::default());
        assert_eq!(UploadController::submit(&state).await, UploadStatus::Idle);
        assert!(!UploadController::cancel(&state));
        assert_eq!(UploadController::reset(&state), UploadStatus::Idle);
    }
}
