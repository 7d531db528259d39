//! Document retrieval from local paths and http(s) URLs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pqa_core::models::config::PqaConfig;
use pqa_core::DocumentError;

/// Whether `location` should be downloaded rather than read from disk.
pub fn is_url(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Read the raw bytes of a document.
pub async fn fetch_document(location: &str, config: &PqaConfig) -> anyhow::Result<Vec<u8>> {
    if is_url(location) {
        return download(location, config).await;
    }

    let path = Path::new(location);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let data = fs::read(path)?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn fetch_error(location: &str, reason: impl ToString) -> DocumentError {
    DocumentError::Fetch {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}

async fn download(url: &str, config: &PqaConfig) -> anyhow::Result<Vec<u8>> {
    let limit = config.document.max_bytes;
    info!("Downloading document from {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .user_agent(config.fetch.user_agent.as_str())
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(url, e))?;

    if !response.status().is_success() {
        return Err(fetch_error(url, format!("HTTP {}", response.status())).into());
    }

    if let Some(length) = response.content_length() {
        if length as usize > limit {
            return Err(DocumentError::TooLarge {
                size: length as usize,
                limit,
            }
            .into());
        }
    }

    let pb = ProgressBar::new(response.content_length().unwrap_or(0));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message("Downloading...");

    // Stream download with progress
    let mut data = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| fetch_error(url, e))?;
        data.extend_from_slice(&chunk);
        if data.len() > limit {
            pb.abandon();
            return Err(DocumentError::TooLarge {
                size: data.len(),
                limit,
            }
            .into());
        }
        pb.set_position(data.len() as u64);
    }

    pb.finish_and_clear();
    debug!("Downloaded {} bytes", data.len());
    Ok(data)
}
