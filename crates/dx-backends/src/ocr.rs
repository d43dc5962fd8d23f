use std::fmt;

use async_trait::async_trait;

use crate::error::OcrError;
use crate::traits::ObjectRef;

/// Kind of a recognized text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    Page,
    Line,
    Word,
    /// Any block type this crate does not interpret.
    Other(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Other(s) => s,
        }
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        match s {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            other => BlockType::Other(other.to_string()),
        }
    }
}

/// One unit of OCR output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub block_type: BlockType,
    pub text: Option<String>,
}

impl Block {
    pub fn new(block_type: BlockType, text: Option<&str>) -> Self {
        Block {
            block_type,
            text: text.map(str::to_string),
        }
    }

    /// A `LINE` block carrying `text`.
    pub fn line(text: &str) -> Self {
        Block::new(BlockType::Line, Some(text))
    }

    /// The text of a `LINE` block; `None` for every other block or a line with no text.
    pub fn line_text(&self) -> Option<&str> {
        match self.block_type {
            BlockType::Line => self.text.as_deref(),
            _ => None,
        }
    }
}

/// Status of an asynchronous text-detection job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Succeeded,
    Failed,
    PartialSuccess,
    /// Unrecognized status, kept verbatim.
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
            JobStatus::Other(s) => s,
        }
    }

    /// Whether polling should stop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::PartialSuccess
        )
    }

    /// Whether results may be collected.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::PartialSuccess)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            "PARTIAL_SUCCESS" => JobStatus::PartialSuccess,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of results from an asynchronous job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionPage {
    pub status: JobStatus,
    pub status_message: Option<String>,
    pub blocks: Vec<Block>,
    pub next_token: Option<String>,
}

impl DetectionPage {
    /// A page reporting only a status, with no blocks and no continuation.
    pub fn status(status: JobStatus) -> Self {
        DetectionPage {
            status,
            status_message: None,
            blocks: Vec::new(),
            next_token: None,
        }
    }
}

/// Trait for OCR service implementations.
///
/// Mirrors the three calls of a Textract-style text-detection API.
#[async_trait]
pub trait TextDetector: Send + Sync + 'static {
    /// Detect text in a single-page image and return its blocks.
    async fn detect_document_text(&self, document: &ObjectRef) -> Result<Vec<Block>, OcrError>;

    /// Submit an asynchronous text-detection job and return its id.
    async fn start_document_text_detection(&self, document: &ObjectRef)
        -> Result<String, OcrError>;

    /// Fetch job status plus one page of results.
    async fn get_document_text_detection(
        &self,
        job_id: &str,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<DetectionPage, OcrError>;
}
