//! s3filestore — prefix-scoped file storage over S3.
//!
//! This crate provides a narrow put/get interface over a cloud object
//! store.  A [`FileStore`] resolves an `s3://bucket/prefix` location
//! once, then scopes every key under that prefix.  The remote side is
//! abstracted behind the two-operation [`ObjectClient`] trait, so the
//! real AWS SDK client and the in-memory test double are
//! interchangeable.

pub mod client;
pub mod errors;
pub mod store;

pub use client::aws::S3ObjectClient;
pub use client::memory::MemoryObjectClient;
pub use client::{BoxedAsyncRead, ClientError, ObjectClient, ObjectDownload};
pub use errors::FileStoreError;
pub use store::FileStore;
