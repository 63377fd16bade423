//! S3-compatible object store backend.
//!
//! Production implementation of [`ObjectStore`] against an S3 API: AWS S3,
//! MinIO, R2, and friends. Built with explicit static credentials and a
//! custom endpoint (path-style addressing, as MinIO requires) and issues
//! presigned GET URLs for time-limited retrieval.

use async_trait::async_trait;
use aws_sdk_s3::{
    Client, Config,
    config::{BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use std::time::Duration;

use super::object_store::{ObjectStore, StoreError, StoreResult};

/// Connection settings for an S3-compatible endpoint.
#[derive(Clone, Debug)]
pub struct S3StoreConfig {
    /// Full endpoint URL, scheme included (e.g. "http://localhost:9000").
    pub endpoint_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

/// S3-compatible [`ObjectStore`] implementation.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client for the configured endpoint.
    ///
    /// Path-style addressing is always used; virtual-hosted style breaks on
    /// MinIO-like endpoints addressed by IP or port.
    pub fn new(config: S3StoreConfig) -> Self {
        let creds = Credentials::new(
            config.access_key,
            config.secret_key,
            None,
            None,
            "ar-sculptures-static",
        );

        let conf = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .endpoint_url(config.endpoint_url)
            .credentials_provider(creds)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(conf),
        }
    }

    fn backend_err(err: impl std::error::Error) -> StoreError {
        StoreError::Backend(format!("{}", DisplayErrorContext(&err)))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StoreResult<()> {
        let size = data.len() as i64;
        let mut req = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(size)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }

        req.send().await.map_err(Self::backend_err)?;
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(se) if se.is_no_such_key() => StoreError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
                _ => Self::backend_err(err),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        Ok(data.into_bytes())
    }

    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(Self::backend_err)?;
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => match err.as_service_error() {
                Some(se) if se.is_not_found() => Ok(false),
                _ => Err(Self::backend_err(err)),
            },
        }
    }

    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => match err.as_service_error() {
                Some(se) if se.is_not_found() => Ok(false),
                _ => Err(Self::backend_err(err)),
            },
        }
    }

    async fn create_bucket(&self, bucket: &str) -> StoreResult<()> {
        match self.client.create_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            // Another uploader may have won the creation race; both outcomes
            // leave the bucket usable.
            Err(err) => match err.as_service_error() {
                Some(se) if se.is_bucket_already_owned_by_you() || se.is_bucket_already_exists() => {
                    Ok(())
                }
                _ => Err(Self::backend_err(err)),
            },
        }
    }

    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String> {
        let presign_cfg =
            PresigningConfig::expires_in(ttl).map_err(|err| StoreError::Backend(err.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presign_cfg)
            .await
            .map_err(Self::backend_err)?;

        Ok(presigned.uri().to_string())
    }
}
