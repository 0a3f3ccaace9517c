use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{ChatFeed, FeedConnector, FeedError, FeedItem};

#[derive(Debug, Clone)]
pub struct HttpFeedSettings {
    /// Root of the chat bridge service, e.g. `http://127.0.0.1:8600`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` leaves individual fetches unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpFeedSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8600".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Connects to a JSON chat bridge:
///
/// - `GET {base}/videos/{id}` answers `{"alive": bool, "continuation": ...}`
/// - `GET {base}/videos/{id}/chat?continuation=...` answers the same plus
///   `"items": [{"timestamp_usec", "author", "message"}]`
#[derive(Debug, Clone)]
pub struct HttpFeedConnector {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpFeedConnector {
    pub fn new(settings: HttpFeedSettings) -> Result<Self, FeedError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| FeedError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl(settings.base_url));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FeedError::Network(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn video_url(&self, video_id: &str, tail: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base urls, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("videos").push(video_id);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        url
    }
}

#[derive(Debug, Deserialize)]
struct FeedStatus {
    alive: bool,
    #[serde(default)]
    continuation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatPage {
    alive: bool,
    #[serde(default)]
    continuation: Option<String>,
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[async_trait::async_trait]
impl FeedConnector for HttpFeedConnector {
    async fn connect(&self, video_id: &str) -> Result<Box<dyn ChatFeed>, FeedError> {
        let status: FeedStatus =
            get_json(&self.client, self.video_url(video_id, None), video_id).await?;
        Ok(Box::new(HttpFeed {
            client: self.client.clone(),
            video_id: video_id.to_string(),
            chat_url: self.video_url(video_id, Some("chat")),
            alive: status.alive,
            continuation: status.continuation,
        }))
    }
}

struct HttpFeed {
    client: reqwest::Client,
    video_id: String,
    chat_url: Url,
    alive: bool,
    continuation: Option<String>,
}

#[async_trait::async_trait]
impl ChatFeed for HttpFeed {
    fn is_alive(&self) -> bool {
        self.alive
    }

    async fn next_batch(&mut self) -> Result<Vec<FeedItem>, FeedError> {
        let mut url = self.chat_url.clone();
        if let Some(token) = &self.continuation {
            url.query_pairs_mut().append_pair("continuation", token);
        }
        let page: ChatPage = get_json(&self.client, url, &self.video_id).await?;
        self.alive = page.alive;
        if page.continuation.is_some() {
            self.continuation = page.continuation;
        }
        Ok(page.items)
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
    video_id: &str,
) -> Result<T, FeedError> {
    let response = client.get(url).send().await.map_err(map_reqwest_error)?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FeedError::NotFound(video_id.to_string()));
    }
    if !status.is_success() {
        return Err(FeedError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| FeedError::Decode(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FeedError {
    if err.is_timeout() {
        return FeedError::Timeout(err.to_string());
    }
    FeedError::Network(err.to_string())
}
