//! `tumor-bot fetch-model`: download the ONNX checkpoint with progress logging.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

/// Outcome of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// File was already present and `force` was not set.
    Skipped,
    Downloaded { bytes: u64 },
}

/// Downloads `url` to `output`. The body is streamed to `<output>.part` and renamed once the
/// byte count matches `content-length` (when the server sends one). The part file is removed
/// when the download fails.
#[instrument(skip(client))]
pub async fn fetch_model(
    client: &reqwest::Client,
    url: &str,
    output: &Path,
    force: bool,
) -> Result<FetchOutcome> {
    if output.exists() && !force {
        info!(path = %output.display(), "Model weights already present, skipping download");
        return Ok(FetchOutcome::Skipped);
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;
    if !response.status().is_success() {
        anyhow::bail!("HTTP {} for {}", response.status(), url);
    }
    let total_size = response.content_length();
    info!(url, total_size = ?total_size, "Downloading model weights");

    let mut part_name = output.as_os_str().to_owned();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    let downloaded = match stream_to_file(response, &part_path, total_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(e);
        }
    };

    tokio::fs::rename(&part_path, output)
        .await
        .with_context(|| format!("Failed to move model into {}", output.display()))?;
    info!(
        path = %output.display(),
        "Model download complete ({:.2} MB)",
        downloaded as f64 / (1024.0 * 1024.0)
    );
    Ok(FetchOutcome::Downloaded { bytes: downloaded })
}

/// Writes the response body to `path` and checks its size. Returns the byte count.
async fn stream_to_file(
    response: reqwest::Response,
    path: &Path,
    total_size: Option<u64>,
) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut downloaded: u64 = 0;
    let mut last_percent = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Error reading response body")?;
        file.write_all(&chunk).await.context("Error writing model file")?;
        downloaded += chunk.len() as u64;

        if let Some(total) = total_size.filter(|t| *t > 0) {
            let percent = downloaded * 100 / total;
            if percent >= last_percent + 5 {
                last_percent = percent;
                info!(percent, downloaded, total, "Download progress");
            }
        }
    }
    file.flush().await.context("Failed to flush model file")?;

    match total_size {
        Some(total) if downloaded != total => anyhow::bail!(
            "Download incomplete: got {} bytes, expected {}",
            downloaded,
            total
        ),
        Some(_) => {}
        None => warn!("Server did not send content-length; size not verified"),
    }
    Ok(downloaded)
}
