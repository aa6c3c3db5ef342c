use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, MessageResponse, NoteIdParams, NoteInput, NoteResponse},
    error::ApiError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(get_all_notes, create_note, update_note, delete_note),
    components(schemas(NoteResponse, NoteInput, MessageResponse, ErrorResponse)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// Builds the HTTP surface: `/notes` plus its OpenAPI document.
pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route(
            "/notes",
            get(get_all_notes)
                .post(create_note)
                .put(update_note)
                .delete(delete_note)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/api-doc/openapi.json", get(openapi))
        .layer(DefaultBodyLimit::disable())
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// Bodies are decoded regardless of the declared content type.
fn decode_input(body: Result<Bytes, BytesRejection>) -> Result<NoteInput, ApiError> {
    let body = body.map_err(|e| {
        tracing::debug!("failed to read note payload: {e}");
        ApiError::Validation("invalid JSON payload")
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("failed to decode note payload: {e}");
        ApiError::Validation("invalid JSON payload")
    })
}

fn note_id(params: Result<Query<NoteIdParams>, QueryRejection>) -> Result<i64, ApiError> {
    let Ok(Query(params)) = params else {
        return Err(ApiError::Validation("invalid note id"));
    };

    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::Validation("missing note id"))?;

    id.parse()
        .map_err(|_| ApiError::Validation("invalid note id"))
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = service
        .get_all_notes()
        .await
        .map_err(ApiError::storage("query error"))?;

    Ok(Json(notes))
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteInput,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Invalid JSON payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let input = decode_input(body)?;

    let note = service
        .create_note(input)
        .await
        .map_err(ApiError::storage("could not create note"))?;

    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    put,
    path = "/notes",
    params(
        ("id" = i64, Query, description = "Note ID")
    ),
    request_body = NoteInput,
    responses(
        (status = 200, description = "Note updated, or no note had this ID", body = MessageResponse),
        (status = 400, description = "Missing note ID or invalid JSON payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    params: Result<Query<NoteIdParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = note_id(params)?;
    let input = decode_input(body)?;

    service
        .update_note(id, input)
        .await
        .map_err(ApiError::storage("could not update note"))?;

    Ok(Json(MessageResponse::new("note updated")))
}

#[utoipa::path(
    delete,
    path = "/notes",
    params(
        ("id" = i64, Query, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted, or no note had this ID", body = MessageResponse),
        (status = 400, description = "Missing note ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    params: Result<Query<NoteIdParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = note_id(params)?;

    service
        .delete_note(id)
        .await
        .map_err(ApiError::storage("could not delete note"))?;

    Ok(Json(MessageResponse::new("note deleted")))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
