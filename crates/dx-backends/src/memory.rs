use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::traits::{ObjectRef, ObjectStore, PutObject};

/// An object held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// In-memory object store for testing and local runs.
///
/// Every successful `put_object` is appended to a write log so callers can
/// check how many writes happened and in what order.
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectRef, StoredObject>>,
    writes: RwLock<Vec<ObjectRef>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        MemoryStore {
            objects: RwLock::new(HashMap::new()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Seed an object without recording it in the write log.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        objects.insert(
            ObjectRef::new(bucket, key),
            StoredObject {
                body: body.into(),
                content_type: None,
                metadata: BTreeMap::new(),
            },
        );
    }

    /// Look up an object, including its content type and metadata.
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        objects.get(&ObjectRef::new(bucket, key)).cloned()
    }

    /// Every `put_object` call so far, oldest first.
    pub fn writes(&self) -> Vec<ObjectRef> {
        self.writes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        let location = ObjectRef::new(bucket, key);

        objects
            .get(&location)
            .map(|object| object.body.clone())
            .ok_or_else(|| BackendError::NotFound(location.to_string()))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        object: PutObject,
    ) -> Result<(), BackendError> {
        let location = ObjectRef::new(bucket, key);
        {
            let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
            objects.insert(
                location.clone(),
                StoredObject {
                    body: object.body,
                    content_type: Some(object.content_type),
                    metadata: object.metadata,
                },
            );
        }
        self.writes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(location);
        Ok(())
    }
}
