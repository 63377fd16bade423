//! Object store client abstraction.
//!
//! Models the blob store the asset gateway talks to: a key/value store
//! addressed by bucket + object key with put, get, delete, existence checks
//! and time-limited signed-URL issuance. One production implementation exists
//! (`S3ObjectStore`); tests substitute an in-memory fake implementing the
//! same capability set.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object `{key}` not found in bucket `{bucket}`")]
    NotFound { bucket: String, key: String },
    #[error("object store failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Blob store capability set consumed by the asset gateway.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a blob under `bucket/key`, overwriting if present.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StoreResult<()>;

    /// Retrieve full blob contents.
    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Bytes>;

    /// Remove a blob. Absence of the key is not an error.
    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool>;

    /// Check whether a bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool>;

    /// Create a bucket. Already-exists outcomes are treated as success, so
    /// two racing first-time uploads both proceed.
    async fn create_bucket(&self, bucket: &str) -> StoreResult<()>;

    /// Issue a time-limited signed retrieval URL valid for `ttl`.
    ///
    /// Does not verify the object exists; a URL for a missing key will 404
    /// when dereferenced.
    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String>;
}
