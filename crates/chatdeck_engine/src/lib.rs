//! Chatdeck engine: chat feed collaborators, the polling worker and CSV export.
mod engine;
mod export;
mod feed;
mod http_feed;
mod replay;
mod types;
mod worker;

pub use engine::{ChatEngine, WorkerEvents, WorkerHandle};
pub use export::{read_csv, write_csv, ExportError, CSV_HEADER};
pub use feed::{ChatFeed, FeedConnector};
pub use http_feed::{HttpFeedConnector, HttpFeedSettings};
pub use replay::ReplayConnector;
pub use types::{FeedError, FeedItem, WorkerEvent};
pub use worker::{run_worker, PollSettings};
