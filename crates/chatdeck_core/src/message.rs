use serde::{Deserialize, Serialize};

/// One chat line as shown in the dashboard and written to CSV.
///
/// Field names serialize as the CSV header columns `Time`, `Author`, `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "Time")]
    pub timestamp: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Message")]
    pub text: String,
}

impl ChatMessage {
    pub fn new(
        timestamp: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Download name for a session's CSV export: `live_chat_<video_id>.csv`.
pub fn export_filename(video_id: &str) -> String {
    format!("live_chat_{video_id}.csv")
}
