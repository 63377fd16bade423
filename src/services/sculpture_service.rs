//! Sculpture record lifecycle: create-with-upload and read-with-resolved-URL.
//!
//! Composes the asset gateway and the metadata store. The persisted
//! `model_url` column always holds the raw object key; every read resolves a
//! fresh signed URL from it, since a stored signed URL would go stale within
//! a day. The record and the blob are never transactionally linked.

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::asset_gateway::{AssetGateway, GatewayError, MODELS_FOLDER, UploadFile};
use crate::models::sculpture::{ArContent, Sculpture, SculptureView};

const NAME_MAX_LEN: usize = 100;
const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum SculptureError {
    #[error("{0}")]
    Validation(String),
    #[error("sculpture not found")]
    NotFound,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Input for the create-with-upload flow.
#[derive(Debug)]
pub struct NewSculpture {
    pub name: String,
    pub description: Option<String>,
    pub animations: Vec<String>,
    pub file: Option<UploadFile>,
}

#[derive(Clone)]
pub struct SculptureService {
    db: Arc<SqlitePool>,
    assets: AssetGateway,
}

impl SculptureService {
    pub fn new(db: Arc<SqlitePool>, assets: AssetGateway) -> Self {
        Self { db, assets }
    }

    fn validate(input: &NewSculpture) -> Result<(), SculptureError> {
        if input.name.trim().is_empty() {
            return Err(SculptureError::Validation("name is required".into()));
        }
        if input.name.chars().count() > NAME_MAX_LEN {
            return Err(SculptureError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_LEN
            )));
        }
        if let Some(description) = &input.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                return Err(SculptureError::Validation(format!(
                    "description must be at most {} characters",
                    DESCRIPTION_MAX_LEN
                )));
            }
        }
        Ok(())
    }

    /// Upload the model blob, then persist a record referencing its key.
    ///
    /// Validation failures and upload failures both abort before anything is
    /// persisted; a record never references a key that failed to upload.
    pub async fn create(&self, input: NewSculpture) -> Result<Sculpture, SculptureError> {
        Self::validate(&input)?;

        let file = input
            .file
            .as_ref()
            .filter(|file| !file.data.is_empty())
            .ok_or_else(|| SculptureError::Validation("model file is required".into()))?;

        let key = self.assets.upload(file, None, Some(MODELS_FOLDER)).await?;
        let now = Utc::now();

        let sculpture = sqlx::query_as::<_, Sculpture>(
            r#"
            INSERT INTO sculptures (id, name, description, model_url, animations, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, description, model_url, animations, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&key)
        .bind(Json(&input.animations))
        .bind(now)
        .bind(now)
        .fetch_one(&*self.db)
        .await?;

        Ok(sculpture)
    }

    /// Look up a record and build the view the AR front-end consumes.
    ///
    /// The stored key is re-resolved to a fresh 24-hour signed URL on every
    /// read.
    pub async fn get(&self, id: Uuid) -> Result<SculptureView, SculptureError> {
        let sculpture = sqlx::query_as::<_, Sculpture>(
            "SELECT id, name, description, model_url, animations, created_at, updated_at
             FROM sculptures WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => SculptureError::NotFound,
            other => SculptureError::Db(other),
        })?;

        let url = self
            .assets
            .resolve_url(&sculpture.model_url, None, None)
            .await?;

        Ok(SculptureView {
            id: sculpture.id,
            name: sculpture.name,
            ar_content: ArContent {
                model_url: url,
                animations: sculpture.animations.0,
            },
        })
    }
}
