//! Extraction strategies, one per [`DocumentKind`](crate::DocumentKind).

use std::time::Duration;

use dx_backends::{Block, JobStatus, ObjectStore, TextDetector};
use dx_config::OcrConfig;
use tracing::debug;

use crate::clock::Clock;
use crate::document::DocumentReference;
use crate::error::ExtractError;

/// Read a plain-text object. Invalid UTF-8 is replaced, never rejected.
pub async fn read_text(
    store: &dyn ObjectStore,
    document: &DocumentReference,
) -> Result<String, ExtractError> {
    let bytes = store.get_object(&document.bucket, &document.key).await?;
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

/// Detect text in a single image with one synchronous OCR call.
pub async fn detect_image_text(
    detector: &dyn TextDetector,
    document: &DocumentReference,
) -> Result<String, ExtractError> {
    let blocks = detector.detect_document_text(&document.location()).await?;

    let mut lines = Vec::new();
    collect_lines(&blocks, &mut lines);
    Ok(join_lines(&lines))
}

fn collect_lines(blocks: &[Block], lines: &mut Vec<String>) {
    lines.extend(blocks.iter().filter_map(Block::line_text).map(str::to_string));
}

fn join_lines(lines: &[String]) -> String {
    lines.join("\n").trim().to_string()
}

/// State of one asynchronous detection job.
#[derive(Debug)]
struct ExtractionJob {
    job_id: String,
    status: JobStatus,
    status_message: Option<String>,
    lines: Vec<String>,
    next_token: Option<String>,
}

impl ExtractionJob {
    fn new(job_id: String) -> Self {
        ExtractionJob {
            job_id,
            status: JobStatus::InProgress,
            status_message: None,
            lines: Vec::new(),
            next_token: None,
        }
    }

    fn incomplete(self) -> ExtractError {
        ExtractError::JobIncomplete {
            job_id: self.job_id,
            status: self.status,
            status_message: self.status_message,
        }
    }
}

/// Multi-page detection: submit a job, poll it until a deadline, then
/// collect every result page in order.
pub struct AsyncTextDetection<'a> {
    detector: &'a dyn TextDetector,
    clock: &'a dyn Clock,
    poll_interval: Duration,
    timeout: Duration,
    page_size: u32,
}

impl<'a> AsyncTextDetection<'a> {
    pub fn new(detector: &'a dyn TextDetector, clock: &'a dyn Clock, ocr: &OcrConfig) -> Self {
        AsyncTextDetection {
            detector,
            clock,
            poll_interval: ocr.poll_interval.as_duration(),
            timeout: ocr.timeout.as_duration(),
            page_size: ocr.page_size,
        }
    }

    pub async fn run(&self, document: &DocumentReference) -> Result<String, ExtractError> {
        let job_id = self
            .detector
            .start_document_text_detection(&document.location())
            .await?;
        debug!(job_id = %job_id, document = %document, "Started text detection job");

        let mut job = ExtractionJob::new(job_id);
        self.wait(&mut job).await?;

        if !job.status.is_success() {
            return Err(job.incomplete());
        }

        self.collect(&mut job).await?;
        Ok(join_lines(&job.lines))
    }

    /// Poll until the job reaches a terminal status or the deadline passes.
    /// The last observed status is left on the job. A timeout too large to
    /// represent as an instant means no deadline.
    async fn wait(&self, job: &mut ExtractionJob) -> Result<(), ExtractError> {
        let deadline = self.clock.now().checked_add(self.timeout);

        while deadline.map_or(true, |d| self.clock.now() < d) {
            self.clock.sleep(self.poll_interval).await;

            let page = self
                .detector
                .get_document_text_detection(&job.job_id, self.page_size, None)
                .await?;
            job.status = page.status;
            job.status_message = page.status_message;
            debug!(job_id = %job.job_id, status = %job.status, "Polled text detection job");

            if job.status.is_terminal() {
                break;
            }
        }
        Ok(())
    }

    /// Fetch every result page, starting from the first.
    async fn collect(&self, job: &mut ExtractionJob) -> Result<(), ExtractError> {
        job.next_token = None;
        loop {
            let page = self
                .detector
                .get_document_text_detection(&job.job_id, self.page_size, job.next_token.as_deref())
                .await?;
            collect_lines(&page.blocks, &mut job.lines);

            job.next_token = page.next_token.filter(|t| !t.is_empty());
            if job.next_token.is_none() {
                break;
            }
        }
        debug!(job_id = %job.job_id, lines = job.lines.len(), "Collected text detection results");
        Ok(())
    }
}
