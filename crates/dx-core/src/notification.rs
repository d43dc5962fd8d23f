use serde::{Deserialize, Serialize};

use crate::document::DocumentReference;
use crate::error::ExtractError;

/// A batch of queue messages, each wrapping a storage event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

/// One queue message. The body is itself a JSON storage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct StorageEvent {
    #[serde(rename = "Records", default)]
    records: Vec<StorageRecord>,
}

#[derive(Debug, Deserialize)]
struct StorageRecord {
    s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
struct StorageEntity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    key: String,
}

impl BatchEvent {
    /// Parse a batch from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json)
            .map_err(|e| ExtractError::Parse(format!("invalid batch event: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl QueueRecord {
    /// Build a record whose body names one stored object. The key is encoded
    /// the way storage notifications encode it.
    pub fn for_object(bucket: &str, key: &str) -> Self {
        let encoded = urlencoding::encode(key).replace("%20", "+");
        let body = serde_json::json!({
            "Records": [{
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": encoded },
                }
            }]
        });
        QueueRecord {
            body: body.to_string(),
        }
    }

    /// The document named by the first storage event in the body.
    ///
    /// Any further events in the same body are ignored.
    pub fn document(&self) -> Result<DocumentReference, ExtractError> {
        let event: StorageEvent = serde_json::from_str(&self.body)
            .map_err(|e| ExtractError::Parse(format!("invalid record body: {}", e)))?;

        let record = event
            .records
            .into_iter()
            .next()
            .ok_or_else(|| ExtractError::Parse("record body has no storage events".to_string()))?;

        Ok(DocumentReference::new(
            record.s3.bucket.name,
            decode_key(&record.s3.object.key),
        ))
    }
}

/// Decode an object key from a storage notification: `+` becomes a space,
/// then percent-escapes are decoded. Invalid UTF-8 is replaced with U+FFFD.
pub fn decode_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
