use std::sync::Arc;
use std::time::Duration;

use chatdeck_logging::{chat_debug, chat_info, chat_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::{FeedConnector, FeedItem, WorkerEvent};

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Pause between two fetches.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Polls the feed for `video_id` until it ends, fails or `cancel` fires.
///
/// Every non-empty batch is appended to the accumulator and the whole
/// accumulator is published. Errors are reported as a single
/// `WorkerEvent::Failed` and end the loop; nothing escapes this function.
pub async fn run_worker(
    connector: Arc<dyn FeedConnector>,
    video_id: String,
    events: UnboundedSender<WorkerEvent>,
    cancel: CancellationToken,
    settings: PollSettings,
) {
    chat_info!("Worker starting video_id={}", video_id);

    let mut feed = match connector.connect(&video_id).await {
        Ok(feed) => feed,
        Err(err) => {
            chat_warn!("Feed init failed video_id={}: {}", video_id, err);
            let _ = events.send(WorkerEvent::failed(&err));
            return;
        }
    };

    let mut accumulated = Vec::new();
    while feed.is_alive() && !cancel.is_cancelled() {
        let batch = match feed.next_batch().await {
            Ok(batch) => batch,
            Err(err) => {
                chat_warn!("Feed fetch failed video_id={}: {}", video_id, err);
                let _ = events.send(WorkerEvent::failed(&err));
                return;
            }
        };

        if !batch.is_empty() {
            chat_debug!(
                "Batch video_id={} new={} total={}",
                video_id,
                batch.len(),
                accumulated.len() + batch.len()
            );
            accumulated.extend(batch.into_iter().map(FeedItem::into_message));
            if events
                .send(WorkerEvent::Snapshot(accumulated.clone()))
                .is_err()
            {
                chat_info!("Worker receiver dropped video_id={}", video_id);
                return;
            }
        }

        if !feed.is_alive() {
            break;
        }
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(settings.interval) => {}
        }
    }

    if cancel.is_cancelled() {
        chat_info!("Worker cancelled video_id={}", video_id);
    } else {
        chat_info!(
            "Feed ended video_id={} messages={}",
            video_id,
            accumulated.len()
        );
    }
}
