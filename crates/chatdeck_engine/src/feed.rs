use crate::{FeedError, FeedItem};

/// Opens a chat feed for a video. Implementations must be shareable across workers.
#[async_trait::async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(&self, video_id: &str) -> Result<Box<dyn ChatFeed>, FeedError>;
}

/// A live chat feed for one video.
#[async_trait::async_trait]
pub trait ChatFeed: Send {
    /// `false` once the feed has ended; no further batches will arrive.
    fn is_alive(&self) -> bool;

    /// Fetches the messages that arrived since the previous call. May block
    /// for as long as the upstream takes to answer.
    async fn next_batch(&mut self) -> Result<Vec<FeedItem>, FeedError>;
}
