//! Chatdeck core: pure session state machine and view-model helpers.
mod effect;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, StopReason};
pub use message::{export_filename, ChatMessage};
pub use msg::Msg;
pub use state::{AppState, Banner, BannerSeverity, SessionId, SessionPhase};
pub use update::update;
pub use view_model::AppViewModel;
