use std::time::Duration;

use report_core::images::detect_format;

use crate::config::LogoSettings;
use crate::error::LogoError;

/// Fetches the company logo over HTTP.
#[derive(Debug, Clone)]
pub struct LogoFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl LogoFetcher {
    pub fn new(settings: &LogoSettings) -> Self {
        LogoFetcher {
            client: reqwest::Client::new(),
            url: settings.url.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }

    /// Download the logo and check that it is PNG or JPEG data.
    pub async fn fetch(&self) -> Result<Vec<u8>, LogoError> {
        let bytes = tokio::time::timeout(self.timeout, self.download())
            .await
            .map_err(|_| LogoError::Timeout(self.timeout.as_millis() as u64))??;
        detect_format(&bytes)?;
        Ok(bytes)
    }

    async fn download(&self) -> Result<Vec<u8>, LogoError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(LogoError::Status(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// [`fetch`](Self::fetch), with any failure logged and dropped.
    pub async fn fetch_or_skip(&self) -> Option<Vec<u8>> {
        match self.fetch().await {
            Ok(bytes) => {
                tracing::debug!("fetched logo ({} bytes)", bytes.len());
                Some(bytes)
            }
            Err(e) => {
                tracing::warn!("rendering without logo: {}", e);
                None
            }
        }
    }
}
