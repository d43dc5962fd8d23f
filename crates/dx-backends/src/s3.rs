use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use crate::error::BackendError;
use crate::traits::{ObjectRef, ObjectStore, PutObject};

/// Object store backed by S3 or an S3-compatible service.
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Create a store from shared AWS configuration.
    ///
    /// `path_style` should be set for custom endpoints such as MinIO or LocalStack.
    pub fn new(sdk_config: &SdkConfig, path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(path_style)
            .build();
        S3Store {
            client: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    /// Wrap an existing client.
    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        S3Store { client }
    }
}

fn map_sdk_error<E>(operation: &str, location: &ObjectRef, err: SdkError<E, HttpResponse>) -> BackendError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
        return BackendError::ConnectionFailed {
            backend: "s3".to_string(),
            source: Box::new(err),
        };
    }

    match err.code() {
        Some("NoSuchKey") | Some("NotFound") | Some("NoSuchBucket") => {
            BackendError::NotFound(location.to_string())
        }
        Some("AccessDenied") | Some("Forbidden") => {
            BackendError::PermissionDenied(location.to_string())
        }
        _ => BackendError::Other(format!(
            "S3 {} failed for {}: {}",
            operation,
            location,
            DisplayErrorContext(&err)
        )),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        let location = ObjectRef::new(bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error("get", &location, e))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| BackendError::Other(format!("S3 read body failed for {}: {}", location, e)))?;

        let bytes = body.into_bytes().to_vec();
        tracing::debug!(location = %location, size = bytes.len(), "Got object");
        Ok(bytes)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        object: PutObject,
    ) -> Result<(), BackendError> {
        let location = ObjectRef::new(bucket, key);
        let metadata: HashMap<String, String> = object.metadata.into_iter().collect();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(object.body))
            .content_type(object.content_type)
            .set_metadata(Some(metadata))
            .send()
            .await
            .map_err(|e| map_sdk_error("put", &location, e))?;

        tracing::debug!(location = %location, "Put object");
        Ok(())
    }
}
