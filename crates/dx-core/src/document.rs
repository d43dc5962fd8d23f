use std::fmt;

use dx_backends::ObjectRef;

use crate::classify::{classify, extension, DocumentKind};

/// The source document named by one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    pub bucket: String,
    pub key: String,
}

impl DocumentReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        DocumentReference {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn extension(&self) -> String {
        extension(&self.key)
    }

    pub fn kind(&self) -> DocumentKind {
        classify(&self.key)
    }

    /// Location handed to the OCR service, which reads the object itself.
    pub fn location(&self) -> ObjectRef {
        ObjectRef::new(self.bucket.clone(), self.key.clone())
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
