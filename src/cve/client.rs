// NVD API client
//
// Queries single CVE records from the NIST NVD REST API (API v2.0).
// API docs: https://nvd.nist.gov/developers/vulnerabilities
//
// Rate limits: 5 requests per 30 seconds without an API key, 50 with one.
// The client enforces the window locally in addition to honoring 429s.

use crate::config::NvdSettings;
use crate::cve::CveRecord;
use crate::error::IntelError;
use crate::utils::retry::{retry_request, RetryConfig};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const RATE_WINDOW: Duration = Duration::from_secs(30);

/// NVD API client
pub struct NvdClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    retry: RetryConfig,
    window_start: Instant,
    requests_in_window: u32,
}

impl NvdClient {
    pub fn new(settings: &NvdSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("intelrun/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_base: settings.api_base.clone(),
            api_key: settings.api_key.clone(),
            retry: RetryConfig::default(),
            window_start: Instant::now(),
            requests_in_window: 0,
        }
    }

    fn max_requests(&self) -> u32 {
        if self.api_key.is_some() {
            50
        } else {
            5
        }
    }

    async fn respect_rate_limit(&mut self) {
        if self.window_start.elapsed() > RATE_WINDOW {
            self.window_start = Instant::now();
            self.requests_in_window = 0;
        }

        if self.requests_in_window >= self.max_requests() {
            let wait = RATE_WINDOW.saturating_sub(self.window_start.elapsed());
            if !wait.is_zero() {
                debug!("NVD rate-limit window full, sleeping {:?}", wait);
                tokio::time::sleep(wait).await;
            }
            self.window_start = Instant::now();
            self.requests_in_window = 0;
        }

        self.requests_in_window += 1;
    }

    /// Fetch the raw API payload for a single CVE id.
    pub async fn fetch_cve_raw(&mut self, cve_id: &str) -> Result<Value, IntelError> {
        self.respect_rate_limit().await;

        let url = format!("{}?cveId={}", self.api_base, cve_id);
        info!("Fetching {} from NVD", cve_id);

        let response = retry_request(&self.retry, || {
            let mut request = self.client.get(&url);
            if let Some(key) = &self.api_key {
                request = request.header("apiKey", key);
            }
            request.send()
        })
        .await?;

        Ok(response.json().await?)
    }

    /// Fetch and validate a single CVE record.
    pub async fn fetch_cve(&mut self, cve_id: &str) -> Result<CveRecord, IntelError> {
        let payload = self.fetch_cve_raw(cve_id).await?;
        CveRecord::parse(payload)
    }
}
