//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dx_backends::{
    BackendError, Block, DetectionPage, JobStatus, ObjectRef, ObjectStore, OcrError, PutObject,
    TextDetector,
};
use dx_core::Clock;
use tokio::time::Instant;

/// One call made against [`ScriptedDetector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorCall {
    Detect(ObjectRef),
    Start(ObjectRef),
    Get {
        job_id: String,
        max_results: u32,
        next_token: Option<String>,
    },
}

/// OCR double driven by a status script and a token-keyed page table.
///
/// Each `get_document_text_detection` call pops the next scripted status;
/// once the script is empty `idle_status` is returned. Blocks and the next
/// token come from the page registered for the requested token.
pub struct ScriptedDetector {
    image_blocks: Vec<Block>,
    statuses: Mutex<VecDeque<JobStatus>>,
    idle_status: JobStatus,
    status_message: Option<String>,
    pages: HashMap<Option<String>, (Vec<Block>, Option<String>)>,
    fail_detect: bool,
    fail_start: bool,
    calls: Mutex<Vec<DetectorCall>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        ScriptedDetector {
            image_blocks: Vec::new(),
            statuses: Mutex::new(VecDeque::new()),
            idle_status: JobStatus::Succeeded,
            status_message: None,
            pages: HashMap::new(),
            fail_detect: false,
            fail_start: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_image_lines(mut self, lines: &[&str]) -> Self {
        self.image_blocks = lines.iter().map(|l| Block::line(l)).collect();
        self
    }

    pub fn with_image_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.image_blocks = blocks;
        self
    }

    pub fn with_statuses(self, statuses: &[JobStatus]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().cloned().collect();
        self
    }

    pub fn with_idle_status(mut self, status: JobStatus) -> Self {
        self.idle_status = status;
        self
    }

    pub fn with_status_message(mut self, message: &str) -> Self {
        self.status_message = Some(message.to_string());
        self
    }

    /// Register the page returned for `token`.
    pub fn with_page(mut self, token: Option<&str>, lines: &[&str], next: Option<&str>) -> Self {
        let blocks = lines.iter().map(|l| Block::line(l)).collect();
        self.pages
            .insert(token.map(str::to_string), (blocks, next.map(str::to_string)));
        self
    }

    pub fn failing_detect(mut self) -> Self {
        self.fail_detect = true;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn calls(&self) -> Vec<DetectorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `get_document_text_detection` calls.
    pub fn get_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, DetectorCall::Get { .. }))
            .count()
    }
}

#[async_trait]
impl TextDetector for ScriptedDetector {
    async fn detect_document_text(&self, document: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        self.calls
            .lock()
            .unwrap()
            .push(DetectorCall::Detect(document.clone()));
        if self.fail_detect {
            return Err(OcrError::request("DetectDocumentText", "InvalidS3ObjectException"));
        }
        Ok(self.image_blocks.clone())
    }

    async fn start_document_text_detection(
        &self,
        document: &ObjectRef,
    ) -> Result<String, OcrError> {
        self.calls
            .lock()
            .unwrap()
            .push(DetectorCall::Start(document.clone()));
        if self.fail_start {
            return Err(OcrError::request("StartDocumentTextDetection", "ThrottlingException"));
        }
        Ok("job-1".to_string())
    }

    async fn get_document_text_detection(
        &self,
        job_id: &str,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<DetectionPage, OcrError> {
        self.calls.lock().unwrap().push(DetectorCall::Get {
            job_id: job_id.to_string(),
            max_results,
            next_token: next_token.map(str::to_string),
        });

        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.idle_status.clone());
        let (blocks, next) = self
            .pages
            .get(&next_token.map(str::to_string))
            .cloned()
            .unwrap_or_default();

        Ok(DetectionPage {
            status,
            status_message: self.status_message.clone(),
            blocks,
            next_token: next,
        })
    }
}

/// Clock whose time moves only when something sleeps on it.
pub struct ManualClock {
    start: Instant,
    wall_start: DateTime<Utc>,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            start: Instant::now(),
            wall_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        self.wall_start + chrono::Duration::from_std(self.elapsed()).unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Store that rejects every write.
pub struct ReadOnlyStore<S>(pub S);

#[async_trait]
impl<S: ObjectStore> ObjectStore for ReadOnlyStore<S> {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        self.0.get_object(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        _object: PutObject,
    ) -> Result<(), BackendError> {
        Err(BackendError::PermissionDenied(format!("s3://{}/{}", bucket, key)))
    }
}
