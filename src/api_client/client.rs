//! Authenticated access to the tab endpoint.
//!
//! A client holds exactly one live API key at a time. The key is valid for
//! many tabs until the service rejects it with HTTP 498, at which point it
//! is re-derived and the same tab is retried, up to a small bound.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use std::time::Duration;

use super::auth;
use super::fetch_error::FetchError;
use super::tab::TabRecord;

pub const UG_API_BASE: &str = "https://api.ultimate-guitar.com";

const TAB_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const KEY_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_KEY_RETRIES: u32 = 3;

/// The seam between the extraction pipeline and the network. Mocked in
/// pipeline tests; implemented by [`TabApiClient`] for real runs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TabSource {
    /// Re-syncs server time and derives a fresh signing key.
    async fn update_api_key(&mut self);

    /// Fetches and decodes a single tab by identifier.
    async fn fetch_tab(&mut self, tab_id: u64) -> Result<TabRecord, FetchError>;
}

pub struct TabApiClient {
    http: Client,
    base_url: String,
    device_id: String,
    api_key: Option<String>,
    pad_hour: bool,
    max_retries: u32,
    retry_delay: Duration,
}

impl TabApiClient {
    pub fn new(device_id: String) -> Self {
        Self::with_base_url(device_id, UG_API_BASE.to_string())
    }

    pub fn with_base_url(device_id: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            device_id,
            api_key: None,
            pad_hour: true,
            max_retries: MAX_KEY_RETRIES,
            retry_delay: KEY_RETRY_DELAY,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    async fn request_tab(&self, tab_id: u64) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!(
            "{}/api/v1/tab/info?tab_id={}&tab_access_type=public",
            self.base_url, tab_id
        );
        self.http
            .get(&url)
            .header("Accept", "application/json")
            .header("Accept-Charset", "utf-8")
            .header("User-Agent", auth::USER_AGENT)
            .header("x-ug-client-id", &self.device_id)
            .header("x-ug-api-key", self.api_key.as_deref().unwrap_or_default())
            .timeout(TAB_FETCH_TIMEOUT)
            .send()
            .await
    }
}

#[async_trait]
impl TabSource for TabApiClient {
    async fn update_api_key(&mut self) {
        let bucket = auth::current_time_bucket(
            &self.http,
            &self.base_url,
            &self.device_id,
            self.pad_hour,
        )
        .await;
        self.api_key = Some(auth::derive_key(&self.device_id, &bucket));
        println!(
            "API key derived - device: {}, time: {}",
            self.device_id, bucket
        );
    }

    async fn fetch_tab(&mut self, tab_id: u64) -> Result<TabRecord, FetchError> {
        if self.api_key.is_none() {
            self.update_api_key().await;
        }

        let mut retries = 0;
        loop {
            let response = self.request_tab(tab_id).await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            match status {
                200 => return serde_json::from_str(&body).map_err(FetchError::from),
                498 => {
                    if retries >= self.max_retries {
                        return Err(FetchError::AuthExhausted {
                            tab_id,
                            retries: self.max_retries,
                        });
                    }
                    retries += 1;
                    // The stale key must never be reused: derive first,
                    // then back off before retrying the same tab.
                    self.update_api_key().await;
                    tokio::time::sleep(self.retry_delay).await;
                }
                451 => return Err(FetchError::LegallyUnavailable { tab_id }),
                _ => return Err(FetchError::HttpError { status, body }),
            }
        }
    }
}
