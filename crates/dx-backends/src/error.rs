/// Errors that can occur in object storage operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Object does not exist.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The caller may not read or write the object.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Connection to a backend failed.
    #[error("Connection to backend '{backend}' failed")]
    ConnectionFailed {
        backend: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other backend-specific error.
    #[error("Backend error: {0}")]
    Other(String),
}

/// Errors reported by the OCR service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OcrError {
    /// The service rejected or failed the request.
    #[error("OCR request '{operation}' failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    /// The response lacked a field the protocol guarantees.
    #[error("OCR response to '{operation}' is missing '{field}'")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl OcrError {
    pub fn request(operation: &'static str, message: impl std::fmt::Display) -> Self {
        OcrError::Request {
            operation,
            message: message.to_string(),
        }
    }
}
