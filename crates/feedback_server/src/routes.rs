use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedback_core::EndpointResponse;
use tokio::task;

use crate::{error::AppError, state::AppState};

/// `POST /api/submit-feedback`. Takes raw bytes so malformed JSON reaches
/// the pipeline instead of being rejected by an extractor.
pub async fn submit_feedback_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let response =
        task::spawn_blocking(move || state.with_service(|service| service.handle_submit(&body)))
            .await?;

    Ok(into_http(response))
}

/// `GET /api/feedbacks`.
pub async fn list_feedbacks_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let response =
        task::spawn_blocking(move || state.with_service(|service| service.handle_list())).await?;

    Ok(into_http(response))
}

fn into_http(response: EndpointResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(response.body)).into_response()
}
