use crate::view_model::AppViewModel;
use crate::{export_filename, ChatMessage};

/// Generation counter for worker sessions. `0` means no session was started yet.
pub type SessionId = u64;

const STARTING_TEXT: &str = "Starting live chat extraction...";
const COMPLETED_TEXT: &str = "Live chat extraction completed!";
const STOPPED_TEXT: &str = "Live chat extraction stopped!";
const INVALID_VIDEO_ID_TEXT: &str = "Please enter a valid video ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Stopped,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub severity: BannerSeverity,
    pub text: String,
}

impl Banner {
    pub fn new(severity: BannerSeverity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// Everything the dashboard controller owns for its single session.
///
/// The snapshot only ever comes from the worker of the current session; it is
/// cleared by `start_session` and kept after stop, completion or failure so it
/// can still be exported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    video_id_input: String,
    phase: SessionPhase,
    session: SessionId,
    active_video_id: Option<String>,
    snapshot: Vec<ChatMessage>,
    banner: Option<Banner>,
    revision: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let running = self.is_running();
        AppViewModel {
            video_id_input: self.video_id_input.clone(),
            phase: self.phase,
            session: self.session,
            active_video_id: self.active_video_id.clone(),
            rows: self.snapshot.clone(),
            banner: self.banner.clone(),
            can_start: !running,
            can_stop: running,
            can_export: !self.snapshot.is_empty(),
            export_filename: self.export_name(),
            revision: self.revision,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn video_id_input(&self) -> &str {
        &self.video_id_input
    }

    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.snapshot
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Filename and rows for a CSV download, or `None` while nothing was collected.
    pub fn export(&self) -> Option<(String, &[ChatMessage])> {
        self.export_name().map(|name| (name, self.snapshot.as_slice()))
    }

    fn export_name(&self) -> Option<String> {
        if self.snapshot.is_empty() {
            return None;
        }
        self.active_video_id.as_deref().map(export_filename)
    }

    pub(crate) fn set_video_id_input(&mut self, input: String) {
        if self.video_id_input != input {
            self.video_id_input = input;
            self.mark_changed();
        }
    }

    pub(crate) fn reject_start(&mut self) {
        self.banner = Some(Banner::new(BannerSeverity::Error, INVALID_VIDEO_ID_TEXT));
        self.mark_changed();
    }

    pub(crate) fn start_session(&mut self, video_id: String) -> SessionId {
        self.session += 1;
        self.phase = SessionPhase::Running;
        self.active_video_id = Some(video_id);
        self.snapshot.clear();
        self.banner = Some(Banner::new(BannerSeverity::Info, STARTING_TEXT));
        self.mark_changed();
        self.session
    }

    pub(crate) fn stop_session(&mut self) {
        self.phase = SessionPhase::Stopped;
        self.banner = Some(Banner::new(BannerSeverity::Success, STOPPED_TEXT));
        self.mark_changed();
    }

    /// Replaces the snapshot if `session` is the running one. Returns whether it applied.
    pub(crate) fn apply_snapshot(
        &mut self,
        session: SessionId,
        messages: Vec<ChatMessage>,
    ) -> bool {
        if !self.accepts_worker_msg(session) {
            return false;
        }
        self.snapshot = messages;
        self.mark_changed();
        true
    }

    pub(crate) fn fail_session(&mut self, session: SessionId, error: String) -> bool {
        if !self.accepts_worker_msg(session) {
            return false;
        }
        self.phase = SessionPhase::Failed;
        self.banner = Some(Banner::new(BannerSeverity::Error, error));
        self.mark_changed();
        true
    }

    pub(crate) fn finish_session(&mut self, session: SessionId) -> bool {
        if !self.accepts_worker_msg(session) {
            return false;
        }
        self.phase = SessionPhase::Completed;
        self.banner = Some(Banner::new(BannerSeverity::Success, COMPLETED_TEXT));
        self.mark_changed();
        true
    }

    fn accepts_worker_msg(&self, session: SessionId) -> bool {
        self.is_running() && session == self.session
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
    }
}
