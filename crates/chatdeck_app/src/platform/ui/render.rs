use chatdeck_core::{AppViewModel, BannerSeverity, ChatMessage, SessionPhase};
use serde::Serialize;

/// JSON shape the dashboard page renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub video_id: String,
    pub phase: &'static str,
    pub active_video_id: Option<String>,
    pub rows: Vec<ChatMessage>,
    pub row_count: usize,
    pub banner: Option<BannerView>,
    pub can_start: bool,
    pub can_stop: bool,
    pub can_export: bool,
    pub export_filename: Option<String>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    pub severity: &'static str,
    pub text: String,
}

pub fn render(view: &AppViewModel) -> DashboardView {
    DashboardView {
        video_id: view.video_id_input.clone(),
        phase: phase_label(view.phase),
        active_video_id: view.active_video_id.clone(),
        rows: view.rows.clone(),
        row_count: view.rows.len(),
        banner: view.banner.as_ref().map(|banner| BannerView {
            severity: severity_label(banner.severity),
            text: banner.text.clone(),
        }),
        can_start: view.can_start,
        can_stop: view.can_stop,
        can_export: view.can_export,
        export_filename: view.export_filename.clone(),
        revision: view.revision,
    }
}

fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Running => "running",
        SessionPhase::Stopped => "stopped",
        SessionPhase::Completed => "completed",
        SessionPhase::Failed => "failed",
    }
}

fn severity_label(severity: BannerSeverity) -> &'static str {
    match severity {
        BannerSeverity::Info => "info",
        BannerSeverity::Success => "success",
        BannerSeverity::Error => "error",
    }
}
