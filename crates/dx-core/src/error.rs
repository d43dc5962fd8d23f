use dx_backends::{BackendError, JobStatus, OcrError};

/// Errors that can occur while extracting a single document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The notification did not name a document.
    #[error("Malformed notification: {0}")]
    Parse(String),

    /// Reading the source or writing the output failed.
    #[error("Storage access failed: {0}")]
    Storage(#[from] BackendError),

    /// A call to the OCR service failed.
    #[error("OCR service call failed: {0}")]
    Ocr(#[from] OcrError),

    /// An asynchronous job failed or did not finish before the deadline.
    #[error("Text detection job {job_id} did not complete: status {status}{}", detail(.status_message))]
    JobIncomplete {
        job_id: String,
        status: JobStatus,
        status_message: Option<String>,
    },

    /// The key's extension is not one this service handles.
    #[error("Unsupported file type '.{extension}' for key '{key}'. Supported: .txt, .png, .jpg, .jpeg, .tif, .tiff, .pdf")]
    UnsupportedType { extension: String, key: String },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default()
}

/// The first failure of a batch, with the number of items processed before it.
#[derive(Debug, thiserror::Error)]
#[error("Batch aborted after {processed} processed item(s): {source}")]
pub struct BatchError {
    pub processed: usize,
    #[source]
    pub source: ExtractError,
}
