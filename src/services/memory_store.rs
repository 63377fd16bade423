//! In-memory [`ObjectStore`] fake for tests.
//!
//! Implements the full capability set over a mutex-guarded map. Signed URLs
//! carry a real expiry timestamp plus a monotonic sequence number, so two
//! URLs issued for the same key always differ. `put` calls are counted so
//! tests can assert that failed flows never reached the store.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use super::object_store::{ObjectStore, StoreError, StoreResult};

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    content_type: Option<String>,
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    buckets: Mutex<HashSet<String>>,
    puts: AtomicUsize,
    url_seq: AtomicU64,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls the store has received.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Content type recorded for a stored object, if any.
    pub fn content_type_of(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .and_then(|obj| obj.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);

        if !self.buckets.lock().unwrap().contains(bucket) {
            return Err(StoreError::Backend(format!(
                "bucket `{bucket}` does not exist"
            )));
        }

        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool> {
        Ok(self.buckets.lock().unwrap().contains(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> StoreResult<()> {
        self.buckets.lock().unwrap().insert(bucket.to_string());
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String> {
        let expires = Utc::now().timestamp() + ttl.as_secs() as i64;
        let seq = self.url_seq.fetch_add(1, Ordering::SeqCst);
        Ok(format!("memory://{bucket}/{key}?expires={expires}&seq={seq}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let store = Arc::new(MemoryObjectStore::new());
        store.create_bucket("b").await.unwrap();

        store
            .put("b", "k", Bytes::from_static(b"payload"), Some("text/plain"))
            .await
            .unwrap();
        assert_eq!(store.get("b", "k").await.unwrap().as_ref(), b"payload");
        assert!(store.exists("b", "k").await.unwrap());
        assert_eq!(store.content_type_of("b", "k").as_deref(), Some("text/plain"));

        store.delete("b", "k").await.unwrap();
        assert!(!store.exists("b", "k").await.unwrap());
        assert!(matches!(
            store.get("b", "k").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn put_requires_bucket() {
        let store = MemoryObjectStore::new();
        let err = store
            .put("missing", "k", Bytes::from_static(b"x"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(store.put_count(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryObjectStore::new();
        store.create_bucket("b").await.unwrap();
        store.delete("b", "never-uploaded").await.unwrap();
    }
}
