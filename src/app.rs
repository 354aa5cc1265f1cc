use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Path, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use headers::{HeaderMapExt, Host};
use http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::ApiError;
use crate::id::IdGenerator;
use crate::image::{decode_data_uri, image_id, upload_file_name};
use crate::storage::Storage;

/// Everything a request handler needs, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub ids: Arc<dyn IdGenerator>,
    /// Used in short URLs when a request carries no `Host` header.
    pub fallback_host: String,
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .route("/images", get(list_images))
        .route("/images/{file_name}", get(get_image))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    short_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageEntry {
    image_id: String,
    short_url: String,
}

fn short_url(headers: &HeaderMap, state: &AppState, file_name: &str) -> String {
    let host = headers
        .typed_get::<Host>()
        .map(|host| host.to_string())
        .unwrap_or_else(|| state.fallback_host.clone());

    format!("http://{host}/images/{file_name}")
}

async fn upload(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Json(request) = match payload {
        Ok(json) => json,
        // Bodies that are not declared as JSON are ignored, so they carry no image.
        Err(JsonRejection::MissingJsonContentType(_)) => return Err(ApiError::MissingImage),
        Err(rejection) => return Err(rejection.into()),
    };

    let image = request
        .image
        .filter(|image| !image.is_empty())
        .ok_or(ApiError::MissingImage)?;

    let bytes = decode_data_uri(&image)?;
    let image_id = state.ids.generate();
    let file_name = upload_file_name(&image_id);
    let size = bytes.len();

    state.storage.save(&file_name, bytes).await?;
    tracing::info!(%image_id, size, "saved image");

    Ok(Json(UploadResponse {
        short_url: short_url(&headers, &state, &file_name),
    }))
}

async fn list_images(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ImageEntry>>, ApiError> {
    let files = state.storage.list().await?;

    let images = files
        .iter()
        .filter_map(|file_name| {
            image_id(file_name).map(|id| ImageEntry {
                image_id: id.to_string(),
                short_url: short_url(&headers, &state, file_name),
            })
        })
        .collect();

    Ok(Json(images))
}

async fn get_image(
    Path(file_name): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let (bytes, content_type) = state.storage.get(&file_name).await?;

    Ok(([(header::CONTENT_TYPE, content_type.to_string())], bytes))
}
