use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    sync::broadcast,
    task::{AbortHandle, JoinHandle},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::ValidationError,
        services::{FileSelectionHandler, SubmissionHandler, UploadClient},
    },
    domain::{
        config::UploadConfig,
        models::{FailureReason, FileSummary, SelectedFile, UploadReceipt, UploadStatus},
    },
};

const EVENT_CAPACITY: usize = 64;

/// How a finished submission task was applied to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Applied(UploadStatus),
    /// The attempt was superseded by a reset, cancel or new selection.
    StaleResultIgnored,
}

/// Snapshot published on every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadEvent {
    pub status: UploadStatus,
    pub file: Option<FileSummary>,
}

struct InFlight {
    attempt_id: Uuid,
    abort: AbortHandle,
}

#[derive(Default)]
struct MachineState {
    status: UploadStatus,
    selected: Option<Arc<SelectedFile>>,
    in_flight: Option<InFlight>,
}

struct Inner {
    state: Mutex<MachineState>,
    selection: FileSelectionHandler,
    submission: SubmissionHandler,
    events: broadcast::Sender<UploadEvent>,
}

/// Owns the status and selected file of one upload widget.
///
/// Every transition is published to [`subscribe`](Self::subscribe) receivers.
/// The lock is never held across an await; the network call runs in a spawned
/// task that reports back through [`Settled`].
#[derive(Clone)]
pub struct UploadMachine {
    inner: Arc<Inner>,
}

impl UploadMachine {
    pub fn new(selection: FileSelectionHandler, submission: SubmissionHandler) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(MachineState::default()),
                selection,
                submission,
                events,
            }),
        }
    }

    pub fn from_config(config: &UploadConfig, client: Arc<dyn UploadClient>) -> Self {
        Self::new(
            FileSelectionHandler::new(config.rules.clone()),
            SubmissionHandler::new(client),
        )
    }

    pub fn status(&self) -> UploadStatus {
        self.lock().status.clone()
    }

    pub fn selected_file(&self) -> Option<Arc<SelectedFile>> {
        self.lock().selected.clone()
    }

    /// Receipt of the last successful upload, while the machine is `Succeeded`.
    pub fn result(&self) -> Option<UploadReceipt> {
        match &self.lock().status {
            UploadStatus::Succeeded(receipt) => Some(receipt.clone()),
            _ => None,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.inner.events.subscribe()
    }

    /// Replaces the current selection. A rejected file leaves the machine
    /// `Idle` with nothing selected. Any in-flight attempt is aborted.
    pub fn select_file(
        &self,
        file: Option<SelectedFile>,
    ) -> Result<Arc<SelectedFile>, ValidationError> {
        let file = match self.inner.selection.validate(file) {
            Ok(file) => Arc::new(file),
            Err(err) => return Err(self.reject_selection(err)),
        };

        let mut state = self.lock();
        Self::abort_in_flight(&mut state, "Selection");
        state.selected = Some(file.clone());
        self.transition(&mut state, UploadStatus::Selected);
        Ok(file)
    }

    /// Records a selection that failed, including one that never reached
    /// validation because the file could not be read.
    pub fn reject_selection(&self, err: ValidationError) -> ValidationError {
        let mut state = self.lock();
        Self::abort_in_flight(&mut state, "Rejected selection");
        state.selected = None;
        self.transition(&mut state, UploadStatus::Idle);
        err
    }

    /// Starts uploading the selected file. Returns `None` without touching the
    /// network unless the machine is exactly `Selected`.
    pub fn submit(&self) -> Option<JoinHandle<Settled>> {
        let mut state = self.lock();

        if state.status != UploadStatus::Selected {
            debug!("Ignoring submit while {}", state.status.label());
            return None;
        }
        let file = state.selected.clone()?;

        let attempt_id = Uuid::new_v4();
        let machine = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = machine.inner.submission.submit(&file).await;
            machine.settle(attempt_id, outcome)
        });

        info!("Submitted attempt {}", attempt_id);
        state.in_flight = Some(InFlight {
            attempt_id,
            abort: handle.abort_handle(),
        });
        self.transition(&mut state, UploadStatus::Uploading);

        Some(handle)
    }

    /// Returns to `Idle` from any state, aborting an in-flight request.
    pub fn reset(&self) {
        let mut state = self.lock();
        Self::abort_in_flight(&mut state, "Reset");
        state.selected = None;
        self.transition(&mut state, UploadStatus::Idle);
    }

    /// Aborts the in-flight request and returns to `Idle`. Returns `false`
    /// when nothing was uploading.
    pub fn cancel(&self) -> bool {
        let mut state = self.lock();
        if state.status != UploadStatus::Uploading {
            debug!("Ignoring cancel while {}", state.status.label());
            return false;
        }

        if let Some(in_flight) = state.in_flight.take() {
            in_flight.abort.abort();
            info!("Cancelled attempt {}", in_flight.attempt_id);
        }
        state.selected = None;
        self.transition(&mut state, UploadStatus::Idle);
        true
    }

    /// Applies an outcome if `attempt_id` is still the current attempt. An
    /// aborted task can finish before the abort lands, so this is re-checked
    /// under the lock.
    fn settle(&self, attempt_id: Uuid, outcome: Result<UploadReceipt, FailureReason>) -> Settled {
        let mut state = self.lock();

        let current = state
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.attempt_id == attempt_id);
        if !current || state.status != UploadStatus::Uploading {
            debug!("Ignoring stale result for attempt {}", attempt_id);
            return Settled::StaleResultIgnored;
        }
        state.in_flight = None;

        let status = match outcome {
            Ok(receipt) => UploadStatus::Succeeded(receipt),
            Err(reason) => {
                warn!("Attempt {} failed: {}", attempt_id, reason);
                UploadStatus::Failed(reason)
            }
        };
        self.transition(&mut state, status.clone());
        Settled::Applied(status)
    }

    fn abort_in_flight(state: &mut MachineState, cause: &str) {
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.abort.abort();
            debug!("{} aborts attempt {}", cause, in_flight.attempt_id);
        }
    }

    fn transition(&self, state: &mut MachineState, status: UploadStatus) {
        debug!("{} -> {}", state.status.label(), status.label());
        state.status = status.clone();
        let event = UploadEvent {
            status,
            file: state.selected.as_deref().map(SelectedFile::summary),
        };
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, MachineState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
