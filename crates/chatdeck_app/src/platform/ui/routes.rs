use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chatdeck_core::Msg;
use chatdeck_engine::ExportError;
use chatdeck_logging::{chat_error, chat_info};
use serde::Deserialize;
use serde_json::json;

use super::page::INDEX_HTML;
use super::render::{render, DashboardView};
use crate::platform::app::{Controller, StartOutcome};

type Shared = State<Arc<Controller>>;

pub fn router(controller: Arc<Controller>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/state", get(state))
        .route("/api/start", post(start))
        .route("/api/stop", post(stop))
        .route("/api/export", get(export))
        .with_state(controller)
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("nothing to export yet")]
    NothingToExport,
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NothingToExport => StatusCode::NOT_FOUND,
            ApiError::Export(err) => {
                chat_error!("CSV export failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    #[serde(default)]
    video_id: String,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn state(State(controller): Shared) -> Json<DashboardView> {
    Json(render(&controller.view()))
}

async fn start(
    State(controller): Shared,
    Json(request): Json<StartRequest>,
) -> (StatusCode, Json<DashboardView>) {
    let (outcome, view) = controller.request_start(request.video_id);
    let status = match outcome {
        StartOutcome::Started => {
            chat_info!("Session {} started", view.session);
            StatusCode::OK
        }
        StartOutcome::AlreadyRunning => StatusCode::CONFLICT,
        StartOutcome::InvalidVideoId => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(render(&view)))
}

async fn stop(State(controller): Shared) -> Json<DashboardView> {
    Json(render(&controller.dispatch(Msg::StopClicked)))
}

async fn export(State(controller): Shared) -> Result<Response, ApiError> {
    let (filename, csv) = controller.export_csv()?.ok_or(ApiError::NothingToExport)?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&filename)),
    ];
    Ok((headers, csv).into_response())
}

/// `attachment; filename="..."` with anything outside printable ASCII, plus
/// quotes and backslashes, replaced by `_`.
fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
