use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::types::{Document, DocumentLocation, S3Object};

use crate::error::OcrError;
use crate::ocr::{Block, BlockType, DetectionPage, JobStatus, TextDetector};
use crate::traits::ObjectRef;

/// Text detection backed by AWS Textract.
pub struct TextractDetector {
    client: aws_sdk_textract::Client,
}

impl TextractDetector {
    /// Create a detector from shared AWS configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        TextractDetector {
            client: aws_sdk_textract::Client::new(sdk_config),
        }
    }

    /// Wrap an existing client.
    pub fn from_client(client: aws_sdk_textract::Client) -> Self {
        TextractDetector { client }
    }
}

fn s3_object(document: &ObjectRef) -> S3Object {
    S3Object::builder()
        .bucket(&document.bucket)
        .name(&document.key)
        .build()
}

fn convert_block(block: &aws_sdk_textract::types::Block) -> Block {
    let block_type = block
        .block_type()
        .map(|t| BlockType::from(t.as_str()))
        .unwrap_or_else(|| BlockType::Other(String::new()));
    Block::new(block_type, block.text())
}

#[async_trait]
impl TextDetector for TextractDetector {
    async fn detect_document_text(&self, document: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        let response = self
            .client
            .detect_document_text()
            .document(Document::builder().s3_object(s3_object(document)).build())
            .send()
            .await
            .map_err(|e| OcrError::request("DetectDocumentText", DisplayErrorContext(&e)))?;

        Ok(response.blocks().iter().map(convert_block).collect())
    }

    async fn start_document_text_detection(
        &self,
        document: &ObjectRef,
    ) -> Result<String, OcrError> {
        let response = self
            .client
            .start_document_text_detection()
            .document_location(
                DocumentLocation::builder()
                    .s3_object(s3_object(document))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| {
                OcrError::request("StartDocumentTextDetection", DisplayErrorContext(&e))
            })?;

        response
            .job_id()
            .map(str::to_string)
            .ok_or(OcrError::MissingField {
                operation: "StartDocumentTextDetection",
                field: "JobId",
            })
    }

    async fn get_document_text_detection(
        &self,
        job_id: &str,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<DetectionPage, OcrError> {
        let max_results = i32::try_from(max_results).unwrap_or(i32::MAX);
        let response = self
            .client
            .get_document_text_detection()
            .job_id(job_id)
            .max_results(max_results)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| OcrError::request("GetDocumentTextDetection", DisplayErrorContext(&e)))?;

        // A response without a status is treated as still running.
        let status = response
            .job_status()
            .map(|s| JobStatus::from(s.as_str()))
            .unwrap_or(JobStatus::InProgress);

        Ok(DetectionPage {
            status,
            status_message: response.status_message().map(str::to_string),
            blocks: response.blocks().iter().map(convert_block).collect(),
            next_token: response.next_token().map(str::to_string),
        })
    }
}
