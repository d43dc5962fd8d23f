use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::error::BackendError;

/// A bucket/key pair naming one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        ObjectRef {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// An object body together with the attributes stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObject {
    pub body: Vec<u8>,
    pub content_type: String,
    /// User metadata; keys are stored without any provider prefix.
    pub metadata: BTreeMap<String, String>,
}

impl PutObject {
    /// Create an object with no user metadata.
    pub fn new(body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        PutObject {
            body: body.into(),
            content_type: content_type.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a user metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Trait for object storage implementations.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Read the full body of an object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError>;

    /// Create or replace an object.
    async fn put_object(&self, bucket: &str, key: &str, object: PutObject)
        -> Result<(), BackendError>;
}
