use dx_backends::{ObjectStore, PutObject};
use dx_config::OutputConfig;

use crate::clock::Clock;
use crate::error::ExtractError;

pub const OUTPUT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Source key with every `\` replaced by `/`.
pub fn normalize_key(key: &str) -> String {
    key.replace('\\', "/")
}

/// Output key for a source key. `prefix` is used as-is.
pub fn output_key(prefix: &str, source_key: &str) -> String {
    format!("{}{}.txt", prefix, normalize_key(source_key))
}

/// Persists extracted text next to a deterministic output key.
pub struct OutputWriter<'a> {
    store: &'a dyn ObjectStore,
    clock: &'a dyn Clock,
    bucket: &'a str,
    prefix: String,
}

impl<'a> OutputWriter<'a> {
    pub fn new(store: &'a dyn ObjectStore, clock: &'a dyn Clock, output: &'a OutputConfig) -> Self {
        OutputWriter {
            store,
            clock,
            bucket: &output.bucket,
            prefix: output.key_prefix(),
        }
    }

    pub fn bucket(&self) -> &str {
        self.bucket
    }

    pub fn key_for(&self, source_key: &str) -> String {
        output_key(&self.prefix, source_key)
    }

    /// Write `text` for `source_key`, overwriting any earlier artifact.
    /// Returns the output key.
    pub async fn write(&self, source_key: &str, text: &str) -> Result<String, ExtractError> {
        let key = self.key_for(source_key);
        let object = PutObject::new(text.as_bytes(), OUTPUT_CONTENT_TYPE)
            .with_metadata("generated_at", self.clock.utc_now().to_rfc3339())
            .with_metadata("source_key", normalize_key(source_key));

        self.store.put_object(self.bucket, &key, object).await?;
        Ok(key)
    }
}
