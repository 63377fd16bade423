//! Asset gateway — the contract between sculpture records and blob storage.
//!
//! Translates an inbound file plus placement hints (bucket, folder) into a
//! stored, uniquely-keyed blob, and a stored key back into a retrievable
//! signed URL. All storage concerns go through the injected [`ObjectStore`]
//! handle; nothing here is ambient or static.

use bytes::Bytes;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::object_store::{ObjectStore, StoreError};

/// Folder uploaded sculpture models are placed under.
pub const MODELS_FOLDER: &str = "models";

/// Every resolved URL is valid for 24 hours from issuance.
const SIGNED_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no file provided")]
    EmptyFile,
    #[error("file `{key}` not found")]
    NotFound { key: String },
    #[error("object store failure: {0}")]
    Storage(String),
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key, .. } => GatewayError::NotFound { key },
            StoreError::Backend(msg) => GatewayError::Storage(msg),
        }
    }
}

/// An uploaded file, fully buffered.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Mediates between sculpture records and the object store.
#[derive(Clone)]
pub struct AssetGateway {
    store: Arc<dyn ObjectStore>,
    default_bucket: String,
}

impl AssetGateway {
    pub fn new(store: Arc<dyn ObjectStore>, default_bucket: impl Into<String>) -> Self {
        Self {
            store,
            default_bucket: default_bucket.into(),
        }
    }

    fn qualified_key(folder: Option<&str>, name: &str) -> String {
        match folder {
            Some(folder) if !folder.is_empty() => format!("{}/{}", folder, name),
            _ => name.to_string(),
        }
    }

    /// Store a blob under a fresh unique key and return that key.
    ///
    /// The key is `{random token}_{original file name}`, folder-qualified
    /// when a folder is given, so distinct uploads of identically-named files
    /// never collide and never overwrite a prior object. The target bucket is
    /// created lazily; losing the creation race to a concurrent uploader is
    /// harmless.
    pub async fn upload(
        &self,
        file: &UploadFile,
        bucket: Option<&str>,
        folder: Option<&str>,
    ) -> Result<String, GatewayError> {
        if file.data.is_empty() {
            return Err(GatewayError::EmptyFile);
        }

        let bucket = bucket.unwrap_or(&self.default_bucket);
        let key = Self::qualified_key(folder, &format!("{}_{}", Uuid::new_v4(), file.file_name));

        if !self.store.bucket_exists(bucket).await? {
            self.store.create_bucket(bucket).await?;
        }

        self.store
            .put(bucket, &key, file.data.clone(), file.content_type.as_deref())
            .await?;

        debug!(
            "stored {} bytes under {}/{}",
            file.data.len(),
            bucket,
            key
        );
        Ok(key)
    }

    /// Fetch full blob contents for a stored key.
    ///
    /// The whole object is buffered before being handed back; large-file
    /// streaming is a known limit of this contract.
    pub async fn download(
        &self,
        file_name: &str,
        bucket: Option<&str>,
        folder: Option<&str>,
    ) -> Result<Bytes, GatewayError> {
        let bucket = bucket.unwrap_or(&self.default_bucket);
        let key = Self::qualified_key(folder, file_name);
        Ok(self.store.get(bucket, &key).await?)
    }

    /// Remove a stored blob.
    ///
    /// Returns `true` on success and `false` on any failure, including
    /// "object not found" — callers cannot distinguish nothing-to-delete from
    /// a failed delete. Repeated deletes of the same key report `false`.
    pub async fn delete(
        &self,
        file_name: &str,
        bucket: Option<&str>,
        folder: Option<&str>,
    ) -> bool {
        let bucket = bucket.unwrap_or(&self.default_bucket);
        let key = Self::qualified_key(folder, file_name);

        match self.store.exists(bucket, &key).await {
            Ok(true) => match self.store.delete(bucket, &key).await {
                Ok(()) => true,
                Err(err) => {
                    warn!("delete of {}/{} failed: {}", bucket, key, err);
                    false
                }
            },
            Ok(false) => false,
            Err(err) => {
                warn!("existence check for {}/{} failed: {}", bucket, key, err);
                false
            }
        }
    }

    /// Issue a fresh 24-hour signed URL for a stored key.
    ///
    /// Never cached and never existence-checked: a key that was never
    /// uploaded (or was deleted since) yields a URL that will 404 when
    /// dereferenced.
    pub async fn resolve_url(
        &self,
        file_name: &str,
        bucket: Option<&str>,
        folder: Option<&str>,
    ) -> Result<String, GatewayError> {
        let bucket = bucket.unwrap_or(&self.default_bucket);
        let key = Self::qualified_key(folder, file_name);
        Ok(self.store.signed_url(bucket, &key, SIGNED_URL_TTL).await?)
    }
}
