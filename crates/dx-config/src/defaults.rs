use crate::types::AppConfig;

impl AppConfig {
    /// Apply normalization rules to the configuration.
    /// This mutates the config in place.
    pub fn apply_defaults(&mut self) {
        // 1. Output prefix always ends with a separator when present
        self.output.prefix = normalize_prefix(&self.output.prefix);

        // 2. Bucket names never carry surrounding whitespace
        self.output.bucket = self.output.bucket.trim().to_string();

        // 3. An empty log filter means the default level
        if self.logging.filter.trim().is_empty() {
            self.logging.filter = "info".to_string();
        }
    }

    /// Returns a new config with all defaults applied.
    pub fn effective(&self) -> AppConfig {
        let mut config = self.clone();
        config.apply_defaults();
        config
    }
}

/// Normalize an output key prefix.
/// `""` -> `""`
/// `"outputs"` -> `"outputs/"`
/// `" outputs/ "` -> `"outputs/"`
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
