use std::fmt;

const TEXT_EXTENSIONS: &[&str] = &["txt"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];
const PAGINATED_EXTENSIONS: &[&str] = &["pdf"];

/// How a document's text is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Read the object and decode it.
    PlainText,
    /// Single-page image, one synchronous OCR call.
    Image,
    /// Multi-page document, asynchronous OCR job.
    PaginatedDocument,
    Unsupported,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::PlainText => "plain-text",
            DocumentKind::Image => "image",
            DocumentKind::PaginatedDocument => "paginated-document",
            DocumentKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased text after the last `.` of the key, or `""` when there is none.
pub fn extension(key: &str) -> String {
    let lower = key.to_lowercase();
    match lower.rfind('.') {
        Some(idx) => lower[idx + 1..].to_string(),
        None => String::new(),
    }
}

/// Classify a document key by its extension.
pub fn classify(key: &str) -> DocumentKind {
    let ext = extension(key);
    let ext = ext.as_str();

    if TEXT_EXTENSIONS.contains(&ext) {
        DocumentKind::PlainText
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        DocumentKind::Image
    } else if PAGINATED_EXTENSIONS.contains(&ext) {
        DocumentKind::PaginatedDocument
    } else {
        DocumentKind::Unsupported
    }
}
