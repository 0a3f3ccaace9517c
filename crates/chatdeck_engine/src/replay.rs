use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::{ChatFeed, FeedConnector, FeedError, FeedItem};

/// Replays recorded chat from `<dir>/<video_id>.jsonl`.
///
/// Each non-blank line is one batch: a JSON array of feed items. The feed
/// stays alive until every batch has been handed out.
#[derive(Debug, Clone)]
pub struct ReplayConnector {
    dir: PathBuf,
}

impl ReplayConnector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl FeedConnector for ReplayConnector {
    async fn connect(&self, video_id: &str) -> Result<Box<dyn ChatFeed>, FeedError> {
        if !is_plain_file_stem(video_id) {
            return Err(FeedError::NotFound(video_id.to_string()));
        }
        let path = self.dir.join(format!("{video_id}.jsonl"));
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(FeedError::NotFound(video_id.to_string()));
            }
            Err(err) => return Err(FeedError::Io(format!("{}: {err}", path.display()))),
        };

        let batches = parse_batches(&content)?;
        Ok(Box::new(ReplayFeed { batches }))
    }
}

fn is_plain_file_stem(video_id: &str) -> bool {
    !video_id.is_empty()
        && video_id != "."
        && video_id != ".."
        && !video_id.contains(['/', '\\'])
}

fn parse_batches(content: &str) -> Result<VecDeque<Vec<FeedItem>>, FeedError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Vec<FeedItem>>(line)
                .map_err(|err| FeedError::Decode(format!("line {}: {err}", index + 1)))
        })
        .collect()
}

struct ReplayFeed {
    batches: VecDeque<Vec<FeedItem>>,
}

#[async_trait::async_trait]
impl ChatFeed for ReplayFeed {
    fn is_alive(&self) -> bool {
        !self.batches.is_empty()
    }

    async fn next_batch(&mut self) -> Result<Vec<FeedItem>, FeedError> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}
