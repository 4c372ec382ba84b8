//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "tumor-bot")]
#[command(about = "Brain tumor detection Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override TELEGRAM_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Analyze a local scan and write the annotated image.
    Detect {
        /// Input image (any format the image crate can decode)
        image: PathBuf,
        /// Output JPEG; defaults to `<image stem>_annotated.jpeg` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download the ONNX model weights.
    FetchModel {
        #[arg(short, long)]
        url: String,
        /// Destination; defaults to MODEL_PATH
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Download even if the file already exists
        #[arg(short, long)]
        force: bool,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides TELEGRAM_BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}
