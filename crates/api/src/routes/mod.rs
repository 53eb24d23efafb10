//! API route definitions.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::json;

use crate::AppState;
use ltp_shared::AppError;

pub mod contracts;
pub mod health;
pub mod stock;

/// Creates the API router with all resource routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contracts::routes())
        .merge(stock::routes())
}

/// Renders an application error as the JSON error envelope.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
