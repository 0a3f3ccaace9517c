use crate::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch a polling worker for `video_id`, tagged with `session`.
    SpawnWorker { session: SessionId, video_id: String },
    /// Cancel and forcibly end the worker belonging to `session`.
    StopWorker { session: SessionId, reason: StopReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    UserRequested,
    WorkerFailed,
}
