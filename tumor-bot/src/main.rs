//! Binary for the brain tumor detection bot.

use anyhow::Result;
use clap::Parser;
use scan_core::init_tracing;
use tumor_bot::{load_config, run_bot, Cli, Commands, DetectionSettings};

fn log_file() -> String {
    std::env::var("LOG_FILE").unwrap_or_else(|_| "logs/tumor-bot.log".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Detect { image, output } => {
            init_tracing(&log_file())?;
            tokio::task::spawn_blocking(move || tumor_bot::detect::run_detect(&image, output))
                .await?
        }
        Commands::FetchModel { url, output, force } => {
            init_tracing(&log_file())?;
            let output = match output {
                Some(path) => path,
                None => DetectionSettings::from_env()?.model_path,
            };
            let client = reqwest::Client::new();
            tumor_bot::weights::fetch_model(&client, &url, &output, force).await?;
            Ok(())
        }
    }
}
