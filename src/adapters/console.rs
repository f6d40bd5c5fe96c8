use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::warn;

use crate::{adapters::dto::status_dto::StatusDTO, application::services::UploadMachine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Human,
    Json,
}

/// Prints every status the machine publishes until the machine is dropped.
pub fn spawn_renderer(machine: &UploadMachine, mode: RenderMode) -> JoinHandle<()> {
    let mut events = machine.subscribe();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("{}", render(&StatusDTO::from(&event), mode)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer fell behind, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

pub fn render(dto: &StatusDTO, mode: RenderMode) -> String {
    match mode {
        RenderMode::Human => dto.line(),
        RenderMode::Json => serde_json::to_string(dto).unwrap_or_else(|e| {
            warn!("Cannot serialize status: {}", e);
            dto.line()
        }),
    }
}
