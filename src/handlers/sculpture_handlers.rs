//! HTTP handlers for sculpture records.
//!
//! Parses multipart create requests and delegates the lifecycle to
//! `SculptureService`.

use crate::{
    errors::AppError,
    models::sculpture::{Sculpture, SculptureView},
    services::{
        asset_gateway::UploadFile,
        sculpture_service::NewSculpture,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

/// GET `/sculptures/{id}` — sculpture view with a freshly resolved model URL.
pub async fn get_sculpture(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SculptureView>, AppError> {
    let view = state.sculptures.get(id).await?;
    Ok(Json(view))
}

/// POST `/sculptures` — multipart create-with-upload.
///
/// Fields: `name`, `description`, `model` (the file), and zero or more
/// repeated `animations` entries naming clips in display order.
pub async fn create_sculpture(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name = String::new();
    let mut description = None;
    let mut animations = Vec::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => {
                name = field
                    .text()
                    .await
                    .map_err(|err| AppError::bad_request(err.to_string()))?;
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| AppError::bad_request(err.to_string()))?,
                );
            }
            "animations" => {
                animations.push(
                    field
                        .text()
                        .await
                        .map_err(|err| AppError::bad_request(err.to_string()))?,
                );
            }
            "model" => {
                let file_name = field.file_name().unwrap_or("model.bin").to_string();
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
            }
            _ => {}
        }
    }

    let created: Sculpture = state
        .sculptures
        .create(NewSculpture {
            name,
            description,
            animations,
            file,
        })
        .await?;

    let location = format!("/sculptures/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}
