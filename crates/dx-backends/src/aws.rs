use aws_config::{BehaviorVersion, Region, SdkConfig};
use dx_config::AwsConfig;

/// Load the shared AWS configuration used by every client.
///
/// Credentials come from the default provider chain.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    tracing::debug!(
        region = ?sdk_config.region(),
        endpoint = ?config.endpoint,
        "Loaded AWS configuration"
    );
    sdk_config
}
