pub mod classify;
pub mod config;
pub mod extract;
pub mod run;

use std::sync::Arc;

use dx_backends::{load_sdk_config, ObjectStore, S3Store, TextDetector, TextractDetector};
use dx_config::AppConfig;

/// Bind the storage and OCR capabilities to AWS.
pub async fn connect(config: &AppConfig) -> (Arc<dyn ObjectStore>, Arc<dyn TextDetector>) {
    let sdk_config = load_sdk_config(&config.aws).await;
    let store = S3Store::new(&sdk_config, config.aws.endpoint.is_some());
    let detector = TextractDetector::new(&sdk_config);
    (Arc::new(store), Arc::new(detector))
}
