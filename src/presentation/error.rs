// Unrecovered handler failures, rendered as a generic 500 page
use crate::application::dashboard_store::StoreError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!DOCTYPE html><title>Internal Server Error</title><h1>Internal Server Error</h1>"),
        )
            .into_response()
    }
}
