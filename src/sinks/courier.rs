use crate::config::CourierConfig;
use crate::sinks::Notifier;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the messaging transport that talks to the caller.
pub struct HttpCourier {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpCourier {
    pub fn new(config: &CourierConfig) -> Self {
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
        }
    }
}

#[async_trait]
impl Notifier for HttpCourier {
    async fn send_video(&self, job_id: &str, artifact: &Path, caption: &str) -> Result<()> {
        let url = format!("{}/jobs/{}/video", self.base_url, job_id);

        let bytes = tokio::fs::read(artifact)
            .await
            .with_context(|| format!("failed to read artifact {}", artifact.display()))?;
        let file_name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "video.mp4".to_string());

        let form = Form::new().text("caption", caption.to_string()).part(
            "video",
            Part::bytes(bytes)
                .file_name(file_name)
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
            anyhow::bail!("courier rejected video ({}): {}", status, body);
        }

        Ok(())
    }

    async fn send_notice(&self, job_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/jobs/{}/notice", self.base_url, job_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("courier rejected notice ({}): {}", status, body);
        }

        Ok(())
    }
}
