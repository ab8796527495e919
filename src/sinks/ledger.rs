use crate::config::LedgerConfig;
use crate::distribute::DistributionRecord;
use crate::sinks::RecordSink;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the append-only distribution ledger.
pub struct HttpLedger {
    client: Client,
    base_url: String,
    token: String,
    table: String,
}

impl HttpLedger {
    pub fn new(config: &LedgerConfig) -> Self {
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
            table: config.table.clone(),
        }
    }
}

#[async_trait]
impl RecordSink for HttpLedger {
    async fn append_row(&self, record: &DistributionRecord) -> Result<()> {
        let url = format!("{}/tables/{}/rows", self.base_url, self.table);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("ledger rejected row ({}): {}", status, body);
        }

        Ok(())
    }
}
