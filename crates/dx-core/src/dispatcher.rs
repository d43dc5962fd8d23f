use std::fmt;
use std::sync::Arc;

use dx_backends::{ObjectStore, TextDetector};
use dx_config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::DocumentKind;
use crate::clock::{Clock, TokioClock};
use crate::document::DocumentReference;
use crate::error::{BatchError, ExtractError};
use crate::notification::BatchEvent;
use crate::output::OutputWriter;
use crate::strategy::{detect_image_text, read_text, AsyncTextDetection};

/// Strategy used for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    DirectRead,
    SyncOcr,
    AsyncOcr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::DirectRead => "direct-read",
            ExtractionMethod::SyncOcr => "sync-ocr",
            ExtractionMethod::AsyncOcr => "async-ocr",
        }
    }

    /// The method for a classification, or `None` when unsupported.
    pub fn for_kind(kind: DocumentKind) -> Option<Self> {
        match kind {
            DocumentKind::PlainText => Some(ExtractionMethod::DirectRead),
            DocumentKind::Image => Some(ExtractionMethod::SyncOcr),
            DocumentKind::PaginatedDocument => Some(ExtractionMethod::AsyncOcr),
            DocumentKind::Unsupported => None,
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub method: ExtractionMethod,
    pub output_key: String,
}

/// Result reported back to the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub processed: usize,
}

/// Routes each notified document through classification, extraction and output.
pub struct Dispatcher<'c> {
    config: &'c AppConfig,
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn TextDetector>,
    clock: Arc<dyn Clock>,
}

impl<'c> Dispatcher<'c> {
    pub fn new(
        config: &'c AppConfig,
        store: Arc<dyn ObjectStore>,
        detector: Arc<dyn TextDetector>,
    ) -> Self {
        Dispatcher {
            config,
            store,
            detector,
            clock: Arc::new(TokioClock),
        }
    }

    /// Replace the clock used for polling and timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Process every record in order. The first failure stops the batch;
    /// records after it are not touched.
    pub async fn process_batch(&self, event: &BatchEvent) -> Result<BatchSummary, BatchError> {
        let mut processed = 0;

        for record in &event.records {
            let result = match record.document() {
                Ok(document) => self.process_reference(&document).await,
                Err(e) => Err(e),
            };

            if let Err(source) = result {
                warn!(processed, error = %source, "Aborting batch");
                return Err(BatchError { processed, source });
            }
            processed += 1;
        }

        Ok(BatchSummary { processed })
    }

    /// Extract one document and write its artifact.
    pub async fn process_reference(
        &self,
        document: &DocumentReference,
    ) -> Result<Extraction, ExtractError> {
        let extension = document.extension();
        info!(
            bucket = %document.bucket,
            key = %document.key,
            extension = %extension,
            "Processing document"
        );

        let method = ExtractionMethod::for_kind(document.kind()).ok_or_else(|| {
            ExtractError::UnsupportedType {
                extension: extension.clone(),
                key: document.key.clone(),
            }
        })?;

        let text = self.extract(method, document).await?;

        let writer = OutputWriter::new(self.store.as_ref(), self.clock.as_ref(), &self.config.output);
        let output_key = writer.write(&document.key, &text).await?;
        info!(
            method = %method,
            output_bucket = %writer.bucket(),
            output_key = %output_key,
            "Wrote extracted text"
        );

        Ok(Extraction { method, output_key })
    }

    async fn extract(
        &self,
        method: ExtractionMethod,
        document: &DocumentReference,
    ) -> Result<String, ExtractError> {
        match method {
            ExtractionMethod::DirectRead => read_text(self.store.as_ref(), document).await,
            ExtractionMethod::SyncOcr => detect_image_text(self.detector.as_ref(), document).await,
            ExtractionMethod::AsyncOcr => {
                AsyncTextDetection::new(self.detector.as_ref(), self.clock.as_ref(), &self.config.ocr)
                    .run(document)
                    .await
            }
        }
    }
}
