//! Axum route handlers for the notebook RPC API.

use crate::error::NotebookError;
use crate::service::NotebookService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use notebook_types::*;
use serde::Serialize;
use std::sync::Arc;

pub struct AppState {
    pub service: NotebookService,
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/rpc/add_note", post(add_note))
        .route("/rpc/get_notes", post(get_notes))
        .route("/rpc/status", get(status))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
}

/// Map a service error to a wire-safe response
fn failure<T: Serialize>(e: NotebookError) -> (StatusCode, Json<RpcResponse<T>>) {
    if e.is_client_error() {
        (StatusCode::BAD_REQUEST, Json(RpcResponse::err(e.to_string())))
    } else {
        log::error!("[RPC] {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcResponse::err(e.to_string())),
        )
    }
}

// POST /rpc/add_note
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddNoteRequest>,
) -> (StatusCode, Json<RpcResponse<String>>) {
    match state.service.add_note(req).await {
        Ok(message) => (StatusCode::OK, Json(RpcResponse::ok(message))),
        Err(e) => failure(e),
    }
}

// POST /rpc/get_notes
pub async fn get_notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetNotesRequest>,
) -> (StatusCode, Json<RpcResponse<NotesListing>>) {
    match state.service.get_notes(&req.topic).await {
        Ok(listing) => (StatusCode::OK, Json(RpcResponse::ok(listing))),
        Err(e) => failure(e),
    }
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    match state.service.status().await {
        Ok(status) => (StatusCode::OK, Json(RpcResponse::ok(status))),
        Err(e) => failure(e),
    }
}
