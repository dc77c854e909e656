//! File store error types.
//!
//! Every failure surfaces immediately with the bucket and key it
//! concerns; nothing is retried or suppressed.  A missing object is not
//! special-cased -- it propagates as [`FileStoreError::DownloadFailed`]
//! like any other download failure, with the underlying
//! [`ClientError::NotFound`](crate::client::ClientError::NotFound) as
//! its source.

use thiserror::Error;

use crate::client::ClientError;

/// Errors returned by [`FileStore`](crate::store::FileStore) operations.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// The location string was malformed or not an `s3://` URL.
    #[error("invalid file store location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// The remote upload call failed.  `key` is the effective
    /// (prefix-resolved) key.
    #[error("failed to upload to s3://{bucket}/{key}")]
    UploadFailed {
        bucket: String,
        key: String,
        #[source]
        source: ClientError,
    },

    /// The remote download call failed, including not-found.  `key` is
    /// the key as the caller supplied it.
    #[error("failed to download from s3://{bucket}/{key}")]
    DownloadFailed {
        bucket: String,
        key: String,
        #[source]
        source: ClientError,
    },

    /// Draining the downloaded body failed after a successful download
    /// call.
    #[error("failed to read object body")]
    ReadFailed {
        #[source]
        source: std::io::Error,
    },
}
