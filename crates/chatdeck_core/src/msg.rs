use crate::{ChatMessage, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the video id input box.
    VideoIdChanged(String),
    /// User clicked Start.
    StartClicked,
    /// User clicked Stop.
    StopClicked,
    /// Worker published the full accumulator for its session.
    SnapshotReceived {
        session: SessionId,
        messages: Vec<ChatMessage>,
    },
    /// Worker hit a feed error; `error` is the display text.
    WorkerFailed { session: SessionId, error: String },
    /// Worker's channel closed: it stopped and everything it sent was drained.
    WorkerExited { session: SessionId },
}
