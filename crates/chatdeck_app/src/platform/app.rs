use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chatdeck_core::{update, AppState, AppViewModel, Msg};
use chatdeck_engine::{write_csv, ChatEngine, ExportError};
use tokio::sync::mpsc;

use super::effects::EffectRunner;

/// What a Start request did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    InvalidVideoId,
}

/// Dashboard controller: the single session's state plus the effect runner.
///
/// Every state change goes through [`Controller::dispatch`]; HTTP handlers
/// call it directly, worker output arrives through the message pump. The
/// state lock is held until the effects of a dispatch have run, so a worker
/// is registered with the runner before any later message can stop it.
pub struct Controller {
    state: Mutex<AppState>,
    runner: EffectRunner,
}

impl Controller {
    /// Creates the controller and spawns the task that applies worker messages.
    ///
    /// The pump only holds a weak reference; it ends once the controller is
    /// dropped and the last worker forwarder has closed its sender.
    pub fn start(engine: ChatEngine) -> Arc<Self> {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
        let controller = Arc::new(Self {
            state: Mutex::new(AppState::new()),
            runner: EffectRunner::new(engine, msg_tx),
        });

        let pump = Arc::downgrade(&controller);
        tokio::spawn(async move {
            while let Some(msg) = msg_rx.recv().await {
                let Some(controller) = pump.upgrade() else {
                    break;
                };
                controller.dispatch(msg);
            }
        });

        controller
    }

    pub fn view(&self) -> AppViewModel {
        self.lock_state().view()
    }

    pub fn dispatch(&self, msg: Msg) -> AppViewModel {
        let mut guard = self.lock_state();
        self.apply(&mut guard, vec![msg])
    }

    /// Sets the input and clicks Start in one step, reporting whether a new
    /// session began.
    pub fn request_start(&self, video_id: String) -> (StartOutcome, AppViewModel) {
        let mut guard = self.lock_state();
        let was_running = guard.is_running();
        let before = guard.session();
        let view = self.apply(
            &mut guard,
            vec![Msg::VideoIdChanged(video_id), Msg::StartClicked],
        );

        let outcome = if guard.session() != before {
            StartOutcome::Started
        } else if was_running {
            StartOutcome::AlreadyRunning
        } else {
            StartOutcome::InvalidVideoId
        };
        (outcome, view)
    }

    /// CSV bytes and download name of the current snapshot, if it has rows.
    pub fn export_csv(&self) -> Result<Option<(String, Vec<u8>)>, ExportError> {
        let guard = self.lock_state();
        match guard.export() {
            Some((filename, rows)) => Ok(Some((filename, write_csv(rows)?))),
            None => Ok(None),
        }
    }

    /// Applies `msgs` in order, then runs the collected effects. The caller
    /// keeps the lock for the whole call.
    fn apply(&self, state: &mut AppState, msgs: Vec<Msg>) -> AppViewModel {
        let mut current = std::mem::take(state);
        let mut effects = Vec::new();
        for msg in msgs {
            let (next, produced) = update(current, msg);
            current = next;
            effects.extend(produced);
        }
        let view = current.view();
        *state = current;

        self.runner.run(effects);
        view
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    use chatdeck_core::SessionPhase;
    use chatdeck_engine::{ChatFeed, FeedConnector, FeedError, FeedItem, PollSettings};

    use super::*;

    /// Feeds that never answer; `live` counts the ones not yet dropped.
    #[derive(Default)]
    struct HangingConnector {
        live: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl FeedConnector for HangingConnector {
        async fn connect(&self, _video_id: &str) -> Result<Box<dyn ChatFeed>, FeedError> {
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(HangingFeed {
                live: self.live.clone(),
            }))
        }
    }

    struct HangingFeed {
        live: Arc<AtomicUsize>,
    }

    impl Drop for HangingFeed {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl ChatFeed for HangingFeed {
        fn is_alive(&self) -> bool {
            true
        }

        async fn next_batch(&mut self) -> Result<Vec<FeedItem>, FeedError> {
            std::future::pending().await
        }
    }

    fn hanging_controller() -> (Arc<Controller>, Arc<AtomicUsize>) {
        let connector = HangingConnector::default();
        let live = connector.live.clone();
        let engine = ChatEngine::new(
            Arc::new(connector),
            PollSettings {
                interval: Duration::from_millis(1),
            },
        );
        (Controller::start(engine), live)
    }

    async fn wait_until_drained(live: &AtomicUsize) -> usize {
        for _ in 0..200 {
            if live.load(Ordering::SeqCst) == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        live.load(Ordering::SeqCst)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_start_and_stop_leave_no_worker_behind() {
        let (controller, live) = hanging_controller();
        controller.dispatch(Msg::VideoIdChanged("abc".into()));

        for _ in 0..300 {
            let barrier = Arc::new(Barrier::new(2));
            let tasks = [Msg::StartClicked, Msg::StopClicked].map(|msg| {
                let controller = controller.clone();
                let barrier = barrier.clone();
                tokio::task::spawn_blocking(move || {
                    barrier.wait();
                    controller.dispatch(msg);
                })
            });
            for task in tasks {
                task.await.unwrap();
            }
            // Stop may have landed first; stop the session Start opened then.
            if controller.view().phase == SessionPhase::Running {
                controller.dispatch(Msg::StopClicked);
            }
            assert_ne!(controller.view().phase, SessionPhase::Running);
        }

        assert_eq!(wait_until_drained(&live).await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_starts_open_one_session() {
        let (controller, _live) = hanging_controller();

        let barrier = Arc::new(Barrier::new(2));
        let tasks = [0, 1].map(|_| {
            let controller = controller.clone();
            let barrier = barrier.clone();
            tokio::task::spawn_blocking(move || {
                barrier.wait();
                controller.request_start("abc".into()).0
            })
        });
        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap());
        }
        outcomes.sort_by_key(|outcome| *outcome as u8);

        assert_eq!(
            outcomes,
            vec![StartOutcome::Started, StartOutcome::AlreadyRunning]
        );
        assert_eq!(controller.view().session, 1);
        controller.dispatch(Msg::StopClicked);
    }

    #[tokio::test]
    async fn blank_video_id_is_reported_as_invalid() {
        let (controller, live) = hanging_controller();

        let (outcome, view) = controller.request_start("   ".into());

        assert_eq!(outcome, StartOutcome::InvalidVideoId);
        assert_eq!(view.phase, SessionPhase::Idle);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dropping_controller_releases_it_and_its_worker() {
        let (controller, live) = hanging_controller();
        let (outcome, _) = controller.request_start("abc".into());
        assert_eq!(outcome, StartOutcome::Started);
        assert_eq!(wait_until_connected(&live).await, 1);

        let weak = Arc::downgrade(&controller);
        drop(controller);

        assert!(weak.upgrade().is_none());
        assert_eq!(wait_until_drained(&live).await, 0);
    }

    async fn wait_until_connected(live: &AtomicUsize) -> usize {
        for _ in 0..200 {
            if live.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        live.load(Ordering::SeqCst)
    }
}
