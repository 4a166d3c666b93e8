//! upload-blast - Batch multipart upload sender
//!
//! Utility for firing a whole load of form POSTs at an upload listener,
//! synchronously, and counting how many came back unhappy. Companion to
//! the upload-echo listener when exercising a file-forwarding pipeline.

use std::path::{Path, PathBuf};

use anyhow::Context;
use reqwest::multipart;
use reqwest::StatusCode;

/// What to send, where, and how many times.
#[derive(Debug, Clone)]
pub struct BlastConfig {
    /// Target URL (any path; the listener matches them all)
    pub url: String,
    /// Multipart field name the file goes under
    pub field: String,
    /// File to send
    pub file: PathBuf,
    /// Number of requests
    pub count: u32,
}

/// Outcome of a blast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastReport {
    pub successes: u32,
    pub failures: u32,
}

/// POST a single multipart upload and return the response status.
pub async fn send_upload(
    client: &reqwest::Client,
    url: &str,
    field: &str,
    file_name: &str,
    payload: Vec<u8>,
) -> reqwest::Result<StatusCode> {
    let part = multipart::Part::bytes(payload).file_name(file_name.to_string());
    let form = multipart::Form::new().part(field.to_string(), part);
    let response = client.post(url).multipart(form).send().await?;
    Ok(response.status())
}

/// Send the configured file `count` times, sequentially.
///
/// Transport errors and non-2xx statuses both count as failures; neither
/// aborts the run. Only setup problems (unreadable file) are fatal.
pub async fn run(config: &BlastConfig) -> anyhow::Result<BlastReport> {
    let payload = tokio::fs::read(&config.file)
        .await
        .with_context(|| format!("Could not read upload file '{}'", config.file.display()))?;
    let file_name = base_name(&config.file);

    let client = reqwest::Client::new();
    let mut failures = 0u32;

    for i in 0..config.count {
        tracing::debug!(request = i, url = %config.url, "Sending upload");
        match send_upload(&client, &config.url, &config.field, &file_name, payload.clone()).await {
            Ok(status) if status.is_success() => {}
            Ok(status) => {
                tracing::warn!(request = i, %status, "Upload rejected");
                failures += 1;
            }
            Err(err) => {
                tracing::warn!(request = i, error = %err, "Upload failed");
                failures += 1;
            }
        }
    }

    Ok(BlastReport {
        successes: config.count - failures,
        failures,
    })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.dat".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name(Path::new("/tmp/fixtures/clean.dat")), "clean.dat");
        assert_eq!(base_name(Path::new("clean.dat")), "clean.dat");
    }
}
