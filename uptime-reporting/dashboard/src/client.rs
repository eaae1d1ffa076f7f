//! HTTP client for the uptime reporting API

use crate::errors::{DashboardError, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use uptime_collector::{DailyRecord, DataEnvelope, InstantRecord};

pub const INSTANT_ENDPOINT: &str = "instant";
pub const DAILY_ENDPOINT: &str = "daily";

/// Client for `{api_url}instant` and `{api_url}daily`
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_url: String,
}

/// Payloads of one dashboard load. `None` means the request failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fetched {
    pub instant: Option<Vec<InstantRecord>>,
    pub daily: Option<Vec<DailyRecord>>,
}

impl ApiClient {
    /// Create a client. Endpoints are appended to `api_url` as-is, so a
    /// trailing slash is added when missing.
    pub fn new(api_url: impl Into<String>, http_timeout: Duration) -> Result<Self> {
        let mut api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(DashboardError::Config("api_url cannot be empty".to_string()));
        }
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("uptime_dashboard/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, api_url })
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}{}", self.api_url, name)
    }

    async fn fetch<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let url = self.endpoint(name);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DashboardError::UnexpectedStatus {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;
        debug!("Received {} records from {}", envelope.data.len(), url);
        Ok(envelope.into_inner())
    }

    pub async fn fetch_instant(&self) -> Result<Vec<InstantRecord>> {
        self.fetch(INSTANT_ENDPOINT).await
    }

    pub async fn fetch_daily(&self) -> Result<Vec<DailyRecord>> {
        self.fetch(DAILY_ENDPOINT).await
    }

    /// Issue both requests concurrently. A failure only drops its own
    /// payload; the other one is still returned.
    pub async fn fetch_all(&self) -> Fetched {
        let (instant, daily) = tokio::join!(self.fetch_instant(), self.fetch_daily());

        Fetched {
            instant: instant
                .map_err(|e| warn!("Instant feed unavailable: {}", e))
                .ok(),
            daily: daily
                .map_err(|e| warn!("Daily counters unavailable: {}", e))
                .ok(),
        }
    }
}
