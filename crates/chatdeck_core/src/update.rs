use crate::{AppState, Effect, Msg, StopReason};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::VideoIdChanged(raw) => {
            state.set_video_id_input(raw);
            Vec::new()
        }
        Msg::StartClicked => {
            // Start is gated on not running; a second worker is never spawned.
            if state.is_running() {
                return (state, Vec::new());
            }
            let video_id = state.video_id_input().trim().to_owned();
            if video_id.is_empty() {
                state.reject_start();
                return (state, Vec::new());
            }
            let session = state.start_session(video_id.clone());
            vec![Effect::SpawnWorker { session, video_id }]
        }
        Msg::StopClicked => {
            if state.is_running() {
                state.stop_session();
                vec![Effect::StopWorker {
                    session: state.session(),
                    reason: StopReason::UserRequested,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::SnapshotReceived { session, messages } => {
            state.apply_snapshot(session, messages);
            Vec::new()
        }
        Msg::WorkerFailed { session, error } => {
            if state.fail_session(session, error) {
                vec![Effect::StopWorker {
                    session,
                    reason: StopReason::WorkerFailed,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::WorkerExited { session } => {
            state.finish_session(session);
            Vec::new()
        }
    };

    (state, effects)
}
