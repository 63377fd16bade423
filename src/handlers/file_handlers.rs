//! HTTP handlers for the file storage proxy.
//!
//! Thin endpoints over the asset gateway: upload, buffered download, delete,
//! and signed-URL resolution. Wildcard path segments carry fully-qualified
//! object keys (e.g. `models/{token}_{name}`).

use crate::{
    errors::AppError,
    models::sculpture::FileInfo,
    services::asset_gateway::{MODELS_FOLDER, UploadFile},
    state::AppState,
};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct FileUrl {
    pub url: String,
}

/// POST `/files/upload` — store a file under the models folder.
///
/// Responds with the stored key, a signed URL for immediate retrieval, and
/// the size/content type of the payload.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileInfo>, AppError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() == Some("file") || field.file_name().is_some() {
            let file_name = field.file_name().unwrap_or("upload.bin").to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|err| AppError::bad_request(err.to_string()))?;
            file = Some(UploadFile {
                file_name,
                content_type,
                data,
            });
            break;
        }
    }

    let file = file.ok_or_else(|| AppError::bad_request("no file provided"))?;

    let key = state.assets.upload(&file, None, Some(MODELS_FOLDER)).await?;
    let url = state.assets.resolve_url(&key, None, None).await?;

    Ok(Json(FileInfo {
        file_name: key,
        url,
        size: file.data.len() as i64,
        content_type: file.content_type,
    }))
}

/// GET `/files/download/{*file_name}` — full object contents, buffered.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.assets.download(&file_name, None, None).await?;

    let attachment_name = file_name.rsplit('/').next().unwrap_or(&file_name);
    let disposition = format!("attachment; filename=\"{}\"", attachment_name);

    let mut response = Response::new(Body::from(bytes));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

/// DELETE `/files/{*file_name}` — 204 on success, 404 otherwise.
///
/// The gateway collapses "object absent" and "delete failed" into one
/// boolean; both surface as 404 here, and an already-gone object is never a
/// 500.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.assets.delete(&file_name, None, None).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!(
            "file `{}` not found",
            file_name
        )))
    }
}

/// GET `/files/url/{*file_name}` — fresh signed URL for a stored key.
///
/// Any resolution failure surfaces as 404.
pub async fn file_url(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<FileUrl>, AppError> {
    let url = state
        .assets
        .resolve_url(&file_name, None, None)
        .await
        .map_err(|err| AppError::not_found(err.to_string()))?;
    Ok(Json(FileUrl { url }))
}
