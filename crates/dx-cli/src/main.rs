use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dx_config::{AppConfig, ConfigError};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "dx", version, about = "Document text extraction relay")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one notification batch and print {"processed": n}
    Run {
        /// Batch event JSON file (reads from stdin if not provided)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Extract text from a single stored document
    Extract {
        /// Source bucket
        #[arg(short, long)]
        bucket: String,
        /// Source key (not URL-encoded)
        #[arg(short, long)]
        key: String,
    },
    /// Show how keys would be classified and where their output would go
    Classify {
        /// Object keys to classify
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show effective configuration
    Config,
}

impl Commands {
    /// Whether the command reads or writes stored objects and so needs a
    /// complete configuration.
    fn needs_output(&self) -> bool {
        matches!(self, Commands::Run { .. } | Commands::Extract { .. })
    }
}

fn find_config() -> Option<PathBuf> {
    // 1. DX_CONFIG environment variable
    if let Ok(path) = std::env::var("DX_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. dx.yaml in current directory
    let cwd_config = PathBuf::from("dx.yaml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    None
}

/// Load from a config file when one is found, otherwise from the environment.
fn load_config(explicit: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match explicit.or_else(find_config) {
        Some(path) => AppConfig::from_file(&path),
        None => AppConfig::from_env(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config)?.effective();
    logging::init_tracing(&config.logging)?;
    if cli.command.needs_output() {
        config.validate_or_err()?;
    }

    match cli.command {
        Commands::Run { event } => {
            commands::run::run(&config, event).await?;
        }
        Commands::Extract { bucket, key } => {
            commands::extract::run(&config, bucket, key).await?;
        }
        Commands::Classify { keys } => {
            commands::classify::run(&config, &keys);
        }
        Commands::Config => {
            commands::config::run(&config)?;
        }
    }

    Ok(())
}
