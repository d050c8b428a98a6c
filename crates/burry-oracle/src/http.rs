//! HTTP aggregator client.
//!
//! Calls `GET {base_url}/v1/feeds/{feed_hex}/latest` and expects
//!
//! ```json
//! { "feed": "<hex>", "value": "153.27", "observedAt": "2026-01-15T12:00:00Z" }
//! ```
//!
//! Every failure mode (transport error or overload status after retries,
//! other non-2xx status,
//! unparsable body, feed mismatch, empty value) maps to
//! [`OracleError::Unavailable`].

use std::time::Duration;

use burry_core::{Address, Price, Timestamp};
use serde::Deserialize;
use url::Url;

use crate::config::{ConfigError, OracleConfig};
use crate::error::OracleError;
use crate::retry::read_with_backoff;
use crate::{PriceObservation, PriceOracle};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestValue {
    #[serde(default)]
    feed: Option<Address>,
    #[serde(default)]
    value: Option<String>,
    observed_at: String,
}

/// Reads price feeds from an HTTP aggregator.
#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    http: reqwest::Client,
    base_url: Url,
    max_retries: u32,
}

impl HttpPriceFeed {
    /// Build a client from configuration.
    ///
    /// `max_staleness_secs` is not applied here; wrap the client in a
    /// [`crate::StalenessGuard`] for that.
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| ConfigError::InvalidApiKey)?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::ClientInit(e.to_string()))?;

        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url,
            max_retries: config.max_retries,
        })
    }

    fn latest_url(&self, feed: &Address) -> Result<Url, OracleError> {
        self.base_url
            .join(&format!("v1/feeds/{}/latest", feed.to_hex()))
            .map_err(|e| OracleError::unavailable(feed, format!("bad feed URL: {e}")))
    }

    async fn fetch(&self, feed: &Address) -> Result<PriceObservation, OracleError> {
        let url = self.latest_url(feed)?;

        let resp = read_with_backoff(feed, self.max_retries, || self.http.get(url.clone()).send()).await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(OracleError::unavailable(feed, format!("HTTP {status}: {body}")));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| OracleError::unavailable(feed, format!("failed to read body: {e}")))?;
        let latest: LatestValue = serde_json::from_slice(&bytes)
            .map_err(|e| OracleError::unavailable(feed, format!("malformed response: {e}")))?;

        if let Some(reported) = latest.feed {
            if reported != *feed {
                return Err(OracleError::unavailable(
                    feed,
                    format!("response is for feed {reported}"),
                ));
            }
        }
        let raw = latest
            .value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| OracleError::unavailable(feed, "feed holds no value"))?;
        let value = Price::parse(raw.trim())
            .map_err(|e| OracleError::unavailable(feed, e.to_string()))?;
        let observed_at = Timestamp::parse(&latest.observed_at)
            .map_err(|e| OracleError::unavailable(feed, e.to_string()))?;

        Ok(PriceObservation { value, observed_at })
    }
}

impl PriceOracle for HttpPriceFeed {
    async fn fetch_price(&self, feed: &Address) -> Result<PriceObservation, OracleError> {
        let observation = self.fetch(feed).await?;
        tracing::debug!(
            feed = %feed.short(),
            value = %observation.value,
            observed_at = %observation.observed_at,
            "oracle price fetched"
        );
        Ok(observation)
    }
}
