use std::sync::{Mutex, PoisonError};

use chatdeck_core::{Effect, Msg, SessionId, StopReason};
use chatdeck_engine::{ChatEngine, WorkerEvent, WorkerEvents, WorkerHandle};
use chatdeck_logging::{chat_debug, chat_info};
use tokio::sync::mpsc;

struct ActiveWorker {
    session: SessionId,
    handle: WorkerHandle,
}

/// Executes effects against the engine and feeds worker output back as `Msg`s.
///
/// Callers serialise `run`; the controller holds its state lock across it.
pub struct EffectRunner {
    engine: ChatEngine,
    msg_tx: mpsc::UnboundedSender<Msg>,
    active: Mutex<Option<ActiveWorker>>,
}

impl EffectRunner {
    pub fn new(engine: ChatEngine, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            engine,
            msg_tx,
            active: Mutex::new(None),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SpawnWorker { session, video_id } => {
                    chat_info!("SpawnWorker session={} video_id={}", session, video_id);
                    let (handle, events) = self.engine.spawn(video_id);
                    let previous = self
                        .lock_active()
                        .replace(ActiveWorker { session, handle });
                    if let Some(previous) = previous {
                        chat_debug!("Stopping leftover worker session={}", previous.session);
                        previous.handle.stop();
                    }
                    tokio::spawn(forward_events(session, events, self.msg_tx.clone()));
                }
                Effect::StopWorker { session, reason } => {
                    let mut active = self.lock_active();
                    if active.as_ref().is_some_and(|worker| worker.session == session) {
                        if let Some(worker) = active.take() {
                            chat_info!(
                                "StopWorker session={} reason={}",
                                session,
                                describe(reason)
                            );
                            worker.handle.stop();
                        }
                    }
                }
            }
        }
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<ActiveWorker>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        if let Some(worker) = self.lock_active().take() {
            chat_debug!("Stopping worker session={} on shutdown", worker.session);
            worker.handle.stop();
        }
    }
}

fn describe(reason: StopReason) -> &'static str {
    match reason {
        StopReason::UserRequested => "user",
        StopReason::WorkerFailed => "failure",
    }
}

/// Drains one worker's channel. Closure of the channel means the worker is
/// gone and everything it sent has been forwarded.
async fn forward_events(
    session: SessionId,
    mut events: WorkerEvents,
    msg_tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(event) = events.recv().await {
        let msg = match event {
            WorkerEvent::Snapshot(messages) => Msg::SnapshotReceived { session, messages },
            WorkerEvent::Failed(error) => Msg::WorkerFailed { session, error },
        };
        if msg_tx.send(msg).is_err() {
            return;
        }
    }
    let _ = msg_tx.send(Msg::WorkerExited { session });
}
