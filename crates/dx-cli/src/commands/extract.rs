use dx_config::AppConfig;
use dx_core::{Dispatcher, DocumentReference};

pub async fn run(
    config: &AppConfig,
    bucket: String,
    key: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let (store, detector) = super::connect(config).await;
    let dispatcher = Dispatcher::new(config, store, detector);

    let document = DocumentReference::new(bucket, key);
    let extraction = dispatcher.process_reference(&document).await?;

    println!(
        "{} -> s3://{}/{} ({})",
        document, config.output.bucket, extraction.output_key, extraction.method
    );
    Ok(())
}
