mod error;
mod memory;
mod ocr;
mod traits;

#[cfg(any(feature = "s3", feature = "textract"))]
mod aws;

#[cfg(feature = "s3")]
mod s3;

#[cfg(feature = "textract")]
mod textract;

pub use error::{BackendError, OcrError};
pub use memory::{MemoryStore, StoredObject};
pub use ocr::{Block, BlockType, DetectionPage, JobStatus, TextDetector};
pub use traits::{ObjectRef, ObjectStore, PutObject};

#[cfg(any(feature = "s3", feature = "textract"))]
pub use aws::load_sdk_config;

#[cfg(feature = "s3")]
pub use s3::S3Store;

#[cfg(feature = "textract")]
pub use textract::TextractDetector;
