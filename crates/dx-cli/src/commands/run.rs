use std::io::Read;
use std::path::PathBuf;

use dx_config::AppConfig;
use dx_core::{BatchEvent, Dispatcher};
use tracing::{error, info};

pub async fn run(config: &AppConfig, event: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = match event {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let batch = BatchEvent::from_json(&raw)?;
    info!(records = batch.len(), "Received batch");

    let (store, detector) = super::connect(config).await;
    let dispatcher = Dispatcher::new(config, store, detector);

    match dispatcher.process_batch(&batch).await {
        Ok(summary) => {
            info!(processed = summary.processed, "Batch complete");
            println!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }
        Err(e) => {
            error!(processed = e.processed, error = %e.source, "Batch failed");
            Err(e.into())
        }
    }
}
