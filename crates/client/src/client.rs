//! Status service client implementation

use crate::error::from_reqwest;
use async_trait::async_trait;
use jobby_core::domain::{RawHistoryRecord, RawJobRecord, StatusPayload};
use jobby_core::port::{FetchError, FetchResult, StatusSource};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the status service; `status` and `history/` hang off it
    pub base_url: String,
    /// Whole-request timeout, the only timeout on the fetch path
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Jobby status client
///
/// Issues one GET per call and hands back the raw records; formatting is
/// left to `jobby_core`.
///
/// # Example
///
/// ```no_run
/// use jobby_client::StatusClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = StatusClient::connect("http://127.0.0.1:8080")?;
/// let running = client.status().await?;
/// println!("{} jobs running", running.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StatusClient {
    /// Build a client from a full configuration
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Client(format!("Failed to create client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Build a client with the default timeout
    pub fn connect(url: impl AsRef<str>) -> FetchResult<Self> {
        Self::new(ClientConfig {
            base_url: url.as_ref().to_string(),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `<base>/status`
    pub async fn status(&self) -> FetchResult<Vec<RawJobRecord>> {
        let url = self.endpoint(&["status"])?;
        let payload: StatusPayload = self.get_json(url).await?;
        Ok(payload.into_records())
    }

    /// GET `<base>/history/<prefix>`
    pub async fn history(&self, prefix: &str) -> FetchResult<Vec<RawHistoryRecord>> {
        let mut segments = vec!["history"];
        segments.extend(prefix.split('/').filter(|s| !s.is_empty()));
        if segments.len() == 1 {
            // keep the trailing slash the service routes on
            segments.push("");
        }
        let url = self.endpoint(&segments)?;
        self.get_json(url).await
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await.map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("{} returned HTTP {}", url, status)));
        }

        response.json::<T>().await.map_err(from_reqwest)
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self) -> FetchResult<Vec<RawJobRecord>> {
        self.status().await
    }

    async fn fetch_history(&self, prefix: &str) -> FetchResult<Vec<RawHistoryRecord>> {
        self.history(prefix).await
    }
}

fn parse_base_url(raw: &str) -> FetchResult<Url> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme {:?}",
            raw, other
        ))),
    }
}
