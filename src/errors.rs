use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No image data received")]
    MissingImage,
    #[error("Invalid image data: {0}")]
    InvalidImage(String),
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error("File not found")]
    NotFound,
    #[error("Failed to save image")]
    SaveFailed(#[source] io::Error),
    #[error("Failed to retrieve images")]
    ListFailed(#[source] io::Error),
    #[error("Failed to read image")]
    ReadFailed(#[source] io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::SaveFailed(_) | ApiError::ListFailed(_) | ApiError::ReadFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::SaveFailed(source)
            | ApiError::ListFailed(source)
            | ApiError::ReadFailed(source) => {
                tracing::error!(error = %source, "{self}");
            }
            _ => tracing::debug!(%status, "{self}"),
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
