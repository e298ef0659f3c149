//! HTTP routes and handlers.
//!
//! Handlers translate between HTTP and [`PasteService`] and nothing else.
//! Error mapping is coarse: expired, consumed, deleted and never-existed all
//! collapse into the same 404 body, and an unparsable ID takes the same path
//! so probing the ID format learns nothing.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use cinderbin_core::{PasteError, PasteStore};
use cinderbin_proto::{
    CreatePasteRequest, CreatePasteResponse, ErrorResponse, HealthResponse, PasteId,
};
use tracing::{debug, warn};

use crate::{clock::Clock, service::PasteService};

/// Build the application router over `service`.
///
/// `max_body_bytes` bounds every request body; oversized uploads fail with
/// 413 before the JSON is parsed.
pub fn build_router<S: PasteStore, C: Clock>(
    service: PasteService<S, C>,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/api/pastes", post(create_paste::<S, C>))
        .route("/api/pastes/{id}", get(read_paste::<S, C>).delete(delete_paste::<S, C>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}

/// `POST /api/pastes`
async fn create_paste<S: PasteStore, C: Clock>(
    State(service): State<PasteService<S, C>>,
    body: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Attachment too large");
            }

            debug!(reason = %rejection.body_text(), "rejected unparsable create body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        },
    };

    match service.create(request).await {
        Ok(id) => (StatusCode::CREATED, Json(CreatePasteResponse { id })).into_response(),
        Err(e) => paste_error_response(&e),
    }
}

/// `GET /api/pastes/{id}`
async fn read_paste<S: PasteStore, C: Clock>(
    State(service): State<PasteService<S, C>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<PasteId>() else {
        return paste_error_response(&PasteError::NotFound);
    };

    match service.read(id).await {
        Ok(paste) => Json(paste).into_response(),
        Err(e) => paste_error_response(&e),
    }
}

/// `DELETE /api/pastes/{id}`
async fn delete_paste<S: PasteStore, C: Clock>(
    State(service): State<PasteService<S, C>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<PasteId>() else {
        return paste_error_response(&PasteError::NotFound);
    };

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => paste_error_response(&e),
    }
}

/// `GET /health`
#[allow(clippy::unused_async)] // handlers must be async to satisfy axum's Handler trait
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

fn paste_error_response(error: &PasteError) -> Response {
    match error {
        PasteError::NotFound => error_response(StatusCode::NOT_FOUND, "Paste not found"),
        PasteError::InvalidRequest(reason) => {
            debug!(reason, "rejected create request");
            error_response(StatusCode::BAD_REQUEST, "Missing required fields")
        },
        PasteError::PayloadTooLarge { limit, got } => {
            debug!(limit, got, "rejected oversized attachment");
            error_response(StatusCode::PAYLOAD_TOO_LARGE, "Attachment too large")
        },
        PasteError::Store(e) => {
            warn!(error = %e, "storage failure");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
        },
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}
