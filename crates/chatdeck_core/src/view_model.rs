use crate::{Banner, ChatMessage, SessionId, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub video_id_input: String,
    pub phase: SessionPhase,
    pub session: SessionId,
    /// Video id the current rows were collected for.
    pub active_video_id: Option<String>,
    pub rows: Vec<ChatMessage>,
    pub banner: Option<Banner>,
    pub can_start: bool,
    pub can_stop: bool,
    pub can_export: bool,
    pub export_filename: Option<String>,
    /// Bumped on every visible change.
    pub revision: u64,
}
