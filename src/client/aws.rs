//! AWS S3 object client.
//!
//! Binds the [`ObjectClient`] capability to a real S3 bucket via the
//! AWS SDK.  Credentials are resolved via the standard AWS credential
//! chain (env vars, `~/.aws/credentials`, IAM role, etc.).

use aws_sdk_s3::Client;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::{BoxedAsyncRead, ClientError, ObjectClient, ObjectDownload};

/// [`ObjectClient`] implementation backed by the AWS S3 SDK.
pub struct S3ObjectClient {
    /// AWS S3 SDK client.
    client: Client,
}

impl S3ObjectClient {
    /// Wrap an already-configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a client from the default AWS credential chain
    /// (environment variables, `~/.aws/credentials`, IAM role, etc.).
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Map an AWS SDK error to an anyhow error with context.
    fn map_sdk_error(context: &str, err: impl std::fmt::Display) -> anyhow::Error {
        anyhow::anyhow!("AWS S3 {context}: {err}")
    }
}

impl ObjectClient for S3ObjectClient {
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
            // The SDK needs a known-length body, so buffer the stream.
            let mut body = body;
            let mut data = Vec::new();
            body.read_to_end(&mut data)
                .await
                .map_err(|e| Self::map_sdk_error("read upload body", e))?;

            debug!("AWS put_object: bucket={} key={}", bucket, key);

            let mut req = self
                .client
                .put_object()
                .bucket(&bucket)
                .key(&key)
                .body(aws_sdk_s3::primitives::ByteStream::from(data));

            if let Some(ct) = content_type {
                req = req.content_type(ct);
            }
            if !metadata.is_empty() {
                req = req.set_metadata(Some(metadata));
            }

            req.send()
                .await
                .map_err(|e| Self::map_sdk_error("put_object", e))?;

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
            debug!("AWS get_object: bucket={} key={}", bucket, key);

            let resp = self
                .client
                .get_object()
                .bucket(&bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if service_err.is_no_such_key() {
                        ClientError::NotFound {
                            bucket: bucket.clone(),
                            key: key.clone(),
                        }
                    } else {
                        ClientError::Other(Self::map_sdk_error("get_object", service_err))
                    }
                })?;

            let content_type = resp.content_type().map(str::to_string);
            let body: BoxedAsyncRead = Box::pin(resp.body.into_async_read());

            Ok(ObjectDownload { body, content_type })
        })
    }
}
