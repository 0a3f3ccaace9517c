use chatdeck_core::ChatMessage;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw chat item as delivered by a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Microseconds since the Unix epoch.
    pub timestamp_usec: i64,
    pub author: String,
    pub message: String,
}

impl FeedItem {
    pub fn new(timestamp_usec: i64, author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp_usec,
            author: author.into(),
            message: message.into(),
        }
    }

    /// Wraps the item into the dashboard's message shape, rendering the
    /// timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub fn into_message(self) -> ChatMessage {
        let timestamp = match DateTime::from_timestamp_micros(self.timestamp_usec) {
            Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            None => self.timestamp_usec.to_string(),
        };
        ChatMessage {
            timestamp,
            author: self.author,
            text: self.message,
        }
    }
}

/// What a worker publishes on its output channel.
///
/// The worker's end (normal, cancelled or aborted) is signalled by the channel
/// closing, not by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// Full copy of everything accumulated so far, in arrival order.
    Snapshot(Vec<ChatMessage>),
    /// Display text of the error that ended the worker, prefixed `Error: `.
    Failed(String),
}

impl WorkerEvent {
    pub(crate) fn failed(err: &FeedError) -> Self {
        WorkerEvent::Failed(format!("Error: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("invalid feed url: {0}")]
    InvalidUrl(String),
    #[error("no live chat found for video {0}")]
    NotFound(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed feed data: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(String),
}
