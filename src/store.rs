//! Prefix-scoped file store adapter.
//!
//! [`FileStore`] resolves an `s3://bucket/prefix` location once at
//! construction, then prepends the prefix to every key before handing
//! the call to its [`ObjectClient`].  Prefixing is idempotent: a key
//! that already starts with the prefix is used as-is, so the same key
//! can be passed back in without double-prefixing.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};
use url::Url;

use crate::client::{BoxedAsyncRead, ObjectClient};
use crate::errors::FileStoreError;

/// Content type reported when the backend does not record one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata key extracted as the object's content type on put.
const CONTENT_TYPE_KEY: &str = "Content-Type";

/// A handle to one logical storage destination: a bucket plus a fixed
/// key prefix, bound to an object client.
pub struct FileStore {
    /// Remote object client.
    client: Arc<dyn ObjectClient>,
    /// Destination bucket, resolved once at construction.
    bucket: String,
    /// Prefix prepended to every key.  May be empty.
    key_prefix: String,
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("bucket", &self.bucket)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl FileStore {
    /// Create a file store from an `s3://<bucket>[/<prefix>]` location.
    ///
    /// Pure parsing; no network or I/O occurs.
    pub fn new(client: Arc<dyn ObjectClient>, location: &str) -> Result<Self, FileStoreError> {
        let parsed = Url::parse(location).map_err(|e| FileStoreError::InvalidLocation {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "s3" {
            return Err(FileStoreError::InvalidLocation {
                location: location.to_string(),
                reason: "location must be an s3:// url".to_string(),
            });
        }

        let bucket = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return Err(FileStoreError::InvalidLocation {
                    location: location.to_string(),
                    reason: "bucket host required".to_string(),
                })
            }
        };

        let key_prefix = parsed.path().trim_start_matches('/').to_string();

        Ok(Self {
            client,
            bucket,
            key_prefix,
        })
    }

    /// Construct directly from parts, bypassing location parsing.
    /// Intended for tests pairing the store with an in-memory client.
    pub fn from_parts(
        client: Arc<dyn ObjectClient>,
        bucket: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
        }
    }

    /// The bucket this store writes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The prefix applied to every key.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Resolve the effective key: prepend the prefix unless the key
    /// already carries it.
    fn effective_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() || key.starts_with(&self.key_prefix) {
            key.to_string()
        } else {
            format!(
                "{}/{}",
                self.key_prefix.trim_end_matches('/'),
                key.trim_start_matches('/')
            )
        }
    }

    /// Upload `body` under `key`, fully replacing any existing object.
    ///
    /// A `"Content-Type"` entry in `metadata` becomes the object's
    /// content type rather than a generic metadata entry.
    pub async fn put(
        &self,
        key: &str,
        body: impl AsyncRead + Send + 'static,
        mut metadata: HashMap<String, String>,
    ) -> Result<(), FileStoreError> {
        let final_key = self.effective_key(key);
        let content_type = metadata.remove(CONTENT_TYPE_KEY);

        debug!(
            "uploading to s3: bucket={} key={}",
            self.bucket, final_key
        );

        self.client
            .upload_object(
                &self.bucket,
                &final_key,
                Box::pin(body),
                content_type,
                metadata,
            )
            .await
            .map_err(|e| FileStoreError::UploadFailed {
                bucket: self.bucket.clone(),
                key: final_key.clone(),
                source: e,
            })?;

        info!("uploaded to s3: bucket={} key={}", self.bucket, final_key);

        Ok(())
    }

    /// Download the object under `key`, returning its body and content
    /// type.  Dropping the reader releases the stream.
    pub async fn get(&self, key: &str) -> Result<(BoxedAsyncRead, String), FileStoreError> {
        let final_key = self.effective_key(key);

        debug!(
            "downloading from s3: bucket={} key={}",
            self.bucket, final_key
        );

        let download = self
            .client
            .download_object(&self.bucket, &final_key)
            .await
            .map_err(|e| FileStoreError::DownloadFailed {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                source: e,
            })?;

        let content_type = download
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Ok((download.body, content_type))
    }

    /// Download the object under `key` and drain it into memory.
    pub async fn get_bytes(&self, key: &str) -> Result<(Bytes, String), FileStoreError> {
        let (mut body, content_type) = self.get(key).await?;

        let mut data = Vec::new();
        body.read_to_end(&mut data)
            .await
            .map_err(|e| FileStoreError::ReadFailed { source: e })?;

        Ok((Bytes::from(data), content_type))
    }
}
