use crate::types::{AppConfig, MAX_PAGE_SIZE};
use crate::ConfigError;

impl AppConfig {
    /// Validate the configuration and return a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.output.bucket.trim().is_empty() {
            errors.push(ConfigError::MissingOutputBucket);
        }

        if self.ocr.poll_interval.as_duration().is_zero() {
            errors.push(ConfigError::InvalidConfig(
                "ocr.poll_interval must be greater than zero".to_string(),
            ));
        }

        if self.ocr.timeout.as_duration().is_zero() {
            errors.push(ConfigError::InvalidConfig(
                "ocr.timeout must be greater than zero".to_string(),
            ));
        }

        if self.ocr.page_size == 0 || self.ocr.page_size > MAX_PAGE_SIZE {
            errors.push(ConfigError::InvalidConfig(format!(
                "ocr.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.ocr.page_size
            )));
        }

        if let Some(endpoint) = &self.aws.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                errors.push(ConfigError::InvalidConfig(format!(
                    "aws.endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }

        errors
    }

    /// Validate and return Ok(()) if valid, or Err with the first error.
    pub fn validate_or_err(&self) -> Result<(), ConfigError> {
        match self.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
