mod classify;
mod clock;
mod dispatcher;
mod document;
mod error;
mod notification;
mod output;
pub mod strategy;

pub use classify::{classify, extension, DocumentKind};
pub use clock::{Clock, TokioClock};
pub use dispatcher::{BatchSummary, Dispatcher, Extraction, ExtractionMethod};
pub use document::DocumentReference;
pub use error::{BatchError, ExtractError};
pub use notification::{decode_key, BatchEvent, QueueRecord};
pub use output::{normalize_key, output_key, OutputWriter, OUTPUT_CONTENT_TYPE};
