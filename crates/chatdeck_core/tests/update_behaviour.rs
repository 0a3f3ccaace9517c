use std::sync::Once;

use chatdeck_core::{
    update, AppState, BannerSeverity, ChatMessage, Effect, Msg, SessionPhase, StopReason,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chatdeck_logging::initialize_for_tests);
}

fn start(state: AppState, video_id: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::VideoIdChanged(video_id.to_string()));
    update(state, Msg::StartClicked)
}

fn msg(t: &str, a: &str, m: &str) -> ChatMessage {
    ChatMessage::new(t, a, m)
}

#[test]
fn start_with_empty_id_shows_validation_error() {
    init_logging();
    let (state, effects) = start(AppState::new(), "");

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Idle);
    assert_eq!(view.session, 0);
    let banner = view.banner.unwrap();
    assert_eq!(banner.severity, BannerSeverity::Error);
    assert_eq!(banner.text, "Please enter a valid video ID");
    assert!(view.can_start);
    assert!(!view.can_export);
}

#[test]
fn start_with_whitespace_id_is_rejected() {
    init_logging();
    let (state, effects) = start(AppState::new(), "   ");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), SessionPhase::Idle);
}

#[test]
fn start_spawns_worker_with_trimmed_id() {
    init_logging();
    let (state, effects) = start(AppState::new(), "  abc123 ");

    assert_eq!(
        effects,
        vec![Effect::SpawnWorker {
            session: 1,
            video_id: "abc123".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Running);
    assert!(!view.can_start);
    assert!(view.can_stop);
    assert_eq!(view.banner.unwrap().severity, BannerSeverity::Info);
}

#[test]
fn second_start_while_running_is_ignored() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let (state, effects) = start(state, "other");

    assert!(effects.is_empty());
    assert_eq!(state.session(), 1);
    assert_eq!(state.view().active_video_id.as_deref(), Some("abc123"));
}

#[test]
fn feed_runs_to_completion() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let first = vec![msg("t1", "a1", "m1")];
    let second = vec![msg("t1", "a1", "m1"), msg("t2", "a2", "m2")];

    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: first,
        },
    );
    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: second.clone(),
        },
    );
    let (state, effects) = update(state, Msg::WorkerExited { session: 1 });

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.rows, second);
    assert_eq!(view.phase, SessionPhase::Completed);
    let banner = view.banner.unwrap();
    assert_eq!(banner.severity, BannerSeverity::Success);
    assert_eq!(banner.text, "Live chat extraction completed!");
    assert!(view.can_start);
    assert!(!view.can_stop);
    assert!(view.can_export);
    assert_eq!(view.export_filename.as_deref(), Some("live_chat_abc123.csv"));
}

#[test]
fn worker_failure_keeps_published_rows_and_stops_worker() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let rows = vec![msg("t1", "a1", "m1")];
    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: rows.clone(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::WorkerFailed {
            session: 1,
            error: "Error: feed went away".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::StopWorker {
            session: 1,
            reason: StopReason::WorkerFailed,
        }]
    );

    // The channel closes after the failure; that must not turn into "completed".
    let (state, effects) = update(state, Msg::WorkerExited { session: 1 });
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Failed);
    let banner = view.banner.unwrap();
    assert_eq!(banner.severity, BannerSeverity::Error);
    assert_eq!(banner.text, "Error: feed went away");
    let (filename, exported) = state.export().unwrap();
    assert_eq!(filename, "live_chat_abc123.csv");
    assert_eq!(exported, rows.as_slice());
}

#[test]
fn stop_before_any_batch_leaves_nothing_to_export() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let (state, effects) = update(state, Msg::StopClicked);

    assert_eq!(
        effects,
        vec![Effect::StopWorker {
            session: 1,
            reason: StopReason::UserRequested,
        }]
    );

    // Anything the worker still had in flight is dropped.
    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: vec![msg("t1", "a1", "m1")],
        },
    );
    let (state, _) = update(state, Msg::WorkerExited { session: 1 });

    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.phase, SessionPhase::Stopped);
    assert_eq!(view.banner.unwrap().text, "Live chat extraction stopped!");
    assert!(!view.can_export);
    assert!(view.export_filename.is_none());
    assert!(state.export().is_none());
}

#[test]
fn stop_twice_emits_one_effect() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let (state, first) = update(state, Msg::StopClicked);
    let before = state.clone();
    let (state, second) = update(state, Msg::StopClicked);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state, before);
}

#[test]
fn restart_resets_rows_and_ignores_stale_worker() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: vec![msg("t1", "a1", "m1")],
        },
    );
    let (state, _) = update(state, Msg::StopClicked);
    let (state, effects) = start(state, "xyz789");

    assert_eq!(
        effects,
        vec![Effect::SpawnWorker {
            session: 2,
            video_id: "xyz789".to_string(),
        }]
    );
    assert!(state.snapshot().is_empty());

    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: vec![msg("old", "old", "old")],
        },
    );
    let (state, effects) = update(
        state,
        Msg::WorkerFailed {
            session: 1,
            error: "Error: stale".to_string(),
        },
    );
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::WorkerExited { session: 1 });

    assert!(state.snapshot().is_empty());
    assert_eq!(state.phase(), SessionPhase::Running);
}

#[test]
fn export_name_follows_collected_video_not_input_box() {
    init_logging();
    let (state, _) = start(AppState::new(), "abc123");
    let (state, _) = update(
        state,
        Msg::SnapshotReceived {
            session: 1,
            messages: vec![msg("t1", "a1", "m1")],
        },
    );
    let (state, _) = update(state, Msg::VideoIdChanged("typed-later".to_string()));

    assert_eq!(
        state.view().export_filename.as_deref(),
        Some("live_chat_abc123.csv")
    );
}

#[test]
fn revision_moves_only_on_visible_change() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::VideoIdChanged("abc".to_string()));
    let after_edit = state.revision();
    let (state, _) = update(state, Msg::VideoIdChanged("abc".to_string()));
    assert_eq!(state.revision(), after_edit);

    let (state, _) = update(state, Msg::StartClicked);
    assert!(state.revision() > after_edit);
}
