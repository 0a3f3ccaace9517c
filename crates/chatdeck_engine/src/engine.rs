use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::worker::{run_worker, PollSettings};
use crate::{FeedConnector, WorkerEvent};

/// Receiving end of a worker's output channel. Yields `None` once the worker
/// has stopped and every event it sent was received.
pub type WorkerEvents = mpsc::UnboundedReceiver<WorkerEvent>;

/// Spawns polling workers on the current tokio runtime.
#[derive(Clone)]
pub struct ChatEngine {
    connector: Arc<dyn FeedConnector>,
    settings: PollSettings,
}

impl ChatEngine {
    pub fn new(connector: Arc<dyn FeedConnector>, settings: PollSettings) -> Self {
        Self {
            connector,
            settings,
        }
    }

    /// Starts a worker for `video_id` with a fresh channel and cancellation token.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, video_id: impl Into<String>) -> (WorkerHandle, WorkerEvents) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_worker(
            self.connector.clone(),
            video_id.into(),
            event_tx,
            cancel.clone(),
            self.settings.clone(),
        ));
        (WorkerHandle { cancel, task }, event_rx)
    }
}

/// Controller-side handle to a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Cancels, then aborts the task so a worker stuck in a fetch ends at its
    /// current await point.
    pub fn stop(&self) {
        self.cancel.cancel();
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
