use regex::Regex;
use std::env;
use std::str::FromStr;

use crate::types::{AppConfig, AwsConfig, HumanDuration, LoggingConfig, OcrConfig, OutputConfig};
use crate::ConfigError;

pub const OUTPUT_BUCKET: &str = "OUTPUT_BUCKET";
pub const OUTPUT_PREFIX: &str = "OUTPUT_PREFIX";
pub const POLL_INTERVAL: &str = "DX_POLL_INTERVAL";
pub const OCR_TIMEOUT: &str = "DX_OCR_TIMEOUT";
pub const PAGE_SIZE: &str = "DX_PAGE_SIZE";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ENDPOINT: &str = "DX_AWS_ENDPOINT";
pub const LOG_FILTER: &str = "DX_LOG";
pub const LOG_FORMAT: &str = "DX_LOG_FORMAT";

/// Interpolate environment variables in a string.
/// Replaces `${VAR_NAME}` with the value of the environment variable.
pub fn interpolate_env(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();

    let mut result = input.to_string();
    let mut missing = Vec::new();

    let matches: Vec<(String, String)> = re
        .captures_iter(input)
        .map(|cap| (cap[0].to_string(), cap[1].to_string()))
        .collect();

    for (full_match, var_name) in matches {
        match env::var(&var_name) {
            Ok(value) => {
                result = result.replace(&full_match, &value);
            }
            Err(_) => {
                if !missing.contains(&var_name) {
                    missing.push(var_name);
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(ConfigError::MissingEnvVars(missing));
    }

    Ok(result)
}

/// Assemble an [`AppConfig`] from named variables.
pub(crate) fn config_from_vars<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let bucket = non_empty(OUTPUT_BUCKET).unwrap_or_default();
    let prefix = lookup(OUTPUT_PREFIX).unwrap_or_default();

    let mut ocr = OcrConfig::default();
    if let Some(raw) = non_empty(POLL_INTERVAL) {
        ocr.poll_interval = parse_var(POLL_INTERVAL, &raw)?;
    }
    if let Some(raw) = non_empty(OCR_TIMEOUT) {
        ocr.timeout = parse_var(OCR_TIMEOUT, &raw)?;
    }
    if let Some(raw) = non_empty(PAGE_SIZE) {
        ocr.page_size = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            name: PAGE_SIZE.to_string(),
            reason: format!("{}", e),
        })?;
    }

    let aws = AwsConfig {
        region: non_empty(AWS_REGION),
        endpoint: non_empty(AWS_ENDPOINT),
    };

    let mut logging = LoggingConfig::default();
    if let Some(filter) = non_empty(LOG_FILTER) {
        logging.filter = filter;
    }
    logging.json = non_empty(LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    Ok(AppConfig {
        output: OutputConfig::new(bucket, prefix),
        ocr,
        aws,
        logging,
    })
}

fn parse_var(name: &str, raw: &str) -> Result<HumanDuration, ConfigError> {
    HumanDuration::from_str(raw).map_err(|reason| ConfigError::InvalidValue {
        name: name.to_string(),
        reason,
    })
}
