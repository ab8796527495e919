use crate::config::ArchiveConfig;
use crate::sinks::ArchiveStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// Uploads carry whole renditions; give them room.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the durable artifact store.
pub struct HttpArchive {
    client: Client,
    base_url: String,
    token: String,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    link: String,
}

impl HttpArchive {
    pub fn new(config: &ArchiveConfig) -> Self {
        let client = Client::builder()
            .timeout(CONNECTION_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            collection: config.collection.clone(),
        }
    }
}

#[async_trait]
impl ArchiveStore for HttpArchive {
    async fn upload(&self, artifact: &Path, display_name: &str) -> Result<String> {
        let url = format!("{}/upload", self.base_url);

        let bytes = tokio::fs::read(artifact)
            .await
            .with_context(|| format!("failed to read artifact {}", artifact.display()))?;

        let form = Form::new()
            .text("name", display_name.to_string())
            .text("collection", self.collection.clone())
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str("video/mp4")?,
            );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("archive upload failed ({}): {}", status, body);
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .context("archive response carried no link")?;

        if parsed.link.is_empty() {
            anyhow::bail!("archive returned an empty link");
        }

        Ok(parsed.link)
    }
}
