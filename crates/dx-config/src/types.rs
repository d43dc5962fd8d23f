use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::defaults::normalize_prefix;

/// Largest page the OCR service will return in a single result request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Human-readable duration (e.g., "200ms", "2s", "1m").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl Default for HumanDuration {
    fn default() -> Self {
        HumanDuration(Duration::from_secs(0))
    }
}

impl HumanDuration {
    pub fn from_secs(secs: u64) -> Self {
        HumanDuration(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for HumanDuration {
    fn from(d: Duration) -> Self {
        HumanDuration(d)
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        let (num_str, unit) = if let Some(n) = s.strip_suffix("ms") {
            (n, "ms")
        } else if let Some(n) = s.strip_suffix('s') {
            (n, "s")
        } else if let Some(n) = s.strip_suffix('m') {
            (n, "m")
        } else if let Some(n) = s.strip_suffix('h') {
            (n, "h")
        } else {
            return Err(format!("Invalid duration format: {}", s));
        };

        let num: u64 = num_str
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in duration: {}", s))?;

        let scaled = |factor: u64| {
            num.checked_mul(factor)
                .map(Duration::from_secs)
                .ok_or_else(|| format!("Duration out of range: {}", s))
        };

        let duration = match unit {
            "ms" => Duration::from_millis(num),
            "s" => Duration::from_secs(num),
            "m" => scaled(60)?,
            "h" => scaled(3600)?,
            _ => return Err(format!("Unknown duration unit: {}", unit)),
        };

        Ok(HumanDuration(duration))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.as_millis();
        let secs = self.0.as_secs();

        // Only use a coarser unit when it is exact, so Display round-trips.
        if millis % 1000 != 0 {
            write!(f, "{}ms", millis)
        } else if secs % 3600 == 0 && secs > 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs % 60 == 0 && secs > 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{}s", secs)
        }
    }
}

impl Serialize for HumanDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HumanDuration::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Where extracted text is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Bucket receiving the `.txt` artifacts.
    pub bucket: String,
    /// Key prefix prepended to every output key.
    #[serde(default)]
    pub prefix: String,
}

impl OutputConfig {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        OutputConfig {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// The prefix as used in output keys: trimmed, and ending with `/` when non-empty.
    pub fn key_prefix(&self) -> String {
        normalize_prefix(&self.prefix)
    }
}

/// Asynchronous OCR polling and pagination settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval: HumanDuration,
    #[serde(default = "default_timeout")]
    pub timeout: HumanDuration,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_poll_interval() -> HumanDuration {
    HumanDuration::from_secs(2)
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from_secs(90)
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            poll_interval: default_poll_interval(),
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// AWS client settings. Credentials always come from the default provider chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AwsConfig {
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint (LocalStack, MinIO) applied to every client.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "info" or "dx_core=debug".
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Top-level configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create a configuration with the given output location and defaults elsewhere.
    pub fn new(output: OutputConfig) -> Self {
        AppConfig {
            output,
            ocr: OcrConfig::default(),
            aws: AwsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
