//! Remote object client capability.
//!
//! The [`ObjectClient`] trait is the narrow seam between the
//! [`FileStore`](crate::store::FileStore) adapter and whatever actually
//! holds the bytes: exactly one upload operation and one download
//! operation against a named bucket and key.  [`aws::S3ObjectClient`]
//! binds it to a real S3 bucket; [`memory::MemoryObjectClient`] keeps
//! everything in a local map for tests.

use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

pub mod aws;
pub mod memory;

/// A boxed async byte reader.  Dropping it releases the underlying
/// stream.
pub type BoxedAsyncRead = Pin<Box<dyn AsyncRead + Send>>;

/// The result of a successful download call.
pub struct ObjectDownload {
    /// The object's body, ready to be read.
    pub body: BoxedAsyncRead,
    /// The backend-reported content type, if any.
    pub content_type: Option<String>,
}

impl std::fmt::Debug for ObjectDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectDownload")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Errors surfaced by an [`ObjectClient`] implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No object exists at the given bucket and key.
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Any other backend failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Async remote object storage contract.
///
/// Implementations issue exactly one remote call per method and add no
/// retry or caching behavior of their own.
pub trait ObjectClient: Send + Sync + 'static {
    /// Upload `body` to `bucket`/`key`, replacing any existing object.
    fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        body: BoxedAsyncRead,
        content_type: Option<String>,
        metadata: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>>;

    /// Download the object at `bucket`/`key`.
    ///
    /// Fails with [`ClientError::NotFound`] when no object exists there.
    fn download_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<ObjectDownload, ClientError>> + Send + '_>>;
}

/// Box a reader of in-memory bytes for use as an upload body.
pub fn body_from_bytes(data: impl Into<Bytes>) -> BoxedAsyncRead {
    Box::pin(std::io::Cursor::new(data.into()))
}
