//! In-memory object client for tests.
//!
//! Holds objects in an instance-scoped map keyed by bucket and key, so
//! every [`MemoryObjectClient`] is an independent store.  Intended for
//! single-threaded test scenarios; the mutex only satisfies `&self`
//! interior mutability and provides no cross-call coordination.

use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use tokio::io::AsyncReadExt;

use super::{BoxedAsyncRead, ClientError, ObjectClient, ObjectDownload};

/// A stored object's bytes plus the content type and metadata it was
/// uploaded with.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Raw bytes of the object.
    pub data: Bytes,
    /// Content type recorded at upload time.
    pub content_type: String,
    /// Metadata recorded at upload time.
    pub metadata: HashMap<String, String>,
}

/// [`ObjectClient`] implementation backed by a local map.
#[derive(Default)]
pub struct MemoryObjectClient {
    /// (bucket, key) -> stored object.
    files: Mutex<HashMap<(String, String), StoredFile>>,
}

impl MemoryObjectClient {
    /// Create an empty in-memory client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of the record stored at `bucket`/`key`, if any.
    pub fn stored(&self, bucket: &str, key: &str) -> Option<StoredFile> {
        self.files
            .lock()
            .expect("memory client lock poisoned")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

impl ObjectClient for MemoryObjectClient {
    fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        body: BoxedAsyncRead,
        content_type: Option<String>,
        metadata: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>> {
        let bucket = bucket.to_string();
        let key = key.to_string();
        Box::pin(async move {
            let mut body = body;
            let mut data = Vec::new();
            body.read_to_end(&mut data)
                .await
                .map_err(|e| anyhow::anyhow!("read upload body: {e}"))?;

            let stored = StoredFile {
                data: Bytes::from(data),
                content_type: content_type
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                metadata,
            };

            self.files
                .lock()
                .expect("memory client lock poisoned")
                .insert((bucket, key), stored);

            Ok(())
        })
    }

    fn download_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<ObjectDownload, ClientError>> + Send + '_>> {
        let bucket = bucket.to_string();
        let key = key.to_string();
        Box::pin(async move {
            let stored = self.stored(&bucket, &key).ok_or(ClientError::NotFound {
                bucket,
                key,
            })?;

            Ok(ObjectDownload {
                body: Box::pin(std::io::Cursor::new(stored.data)),
                content_type: Some(stored.content_type),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::body_from_bytes;

    #[tokio::test]
    async fn upload_then_download_round_trips() {
        let client = MemoryObjectClient::new();
        client
            .upload_object(
                "bucket",
                "key",
                body_from_bytes(&b"payload"[..]),
                Some("text/plain".to_string()),
                HashMap::new(),
            )
            .await
            .unwrap();

        let download = client.download_object("bucket", "key").await.unwrap();
        assert_eq!(download.content_type.as_deref(), Some("text/plain"));

        let mut body = download.body;
        let mut data = Vec::new();
        body.read_to_end(&mut data).await.unwrap();
        assert_eq!(data, b"payload");
    }

    #[tokio::test]
    async fn missing_content_type_defaults() {
        let client = MemoryObjectClient::new();
        client
            .upload_object("b", "k", body_from_bytes(&b"x"[..]), None, HashMap::new())
            .await
            .unwrap();

        let stored = client.stored("b", "k").unwrap();
        assert_eq!(stored.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn download_missing_key_is_not_found() {
        let client = MemoryObjectClient::new();
        let err = client.download_object("b", "nope").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn instances_are_isolated() {
        let a = MemoryObjectClient::new();
        let b = MemoryObjectClient::new();
        a.upload_object("b", "k", body_from_bytes(&b"x"[..]), None, HashMap::new())
            .await
            .unwrap();

        assert!(a.stored("b", "k").is_some());
        assert!(b.stored("b", "k").is_none());
    }
}
