//! Analytics REST API Client
//!
//! HTTP client for the five Syntech analytics endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::SourceConfig;
use crate::error::{FetchResult, RequestFailure};
use crate::join::join_buckets;
use crate::model::{Bucket, RawAnalytics, RawCounter, RawPoint};

/// Anything that can produce the joined analytics responses
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Fetch all five buckets, failing on the first failed request
    async fn fetch_all(&self) -> FetchResult<RawAnalytics>;
}

/// Analytics REST API client
pub struct AnalyticsClient {
    client: Client,
    config: SourceConfig,
}

impl AnalyticsClient {
    /// Create a new client with the given source configuration
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Fetch one of the `{date, count}` array endpoints
    pub async fn series(&self, bucket: Bucket) -> Result<Vec<RawPoint>, RequestFailure> {
        self.get_json(bucket).await
    }

    /// Fetch one of the `{count}` endpoints
    pub async fn counter(&self, bucket: Bucket) -> Result<RawCounter, RequestFailure> {
        self.get_json(bucket).await
    }

    async fn get_json<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<T, RequestFailure> {
        let url = self.config.url(bucket);
        tracing::debug!(bucket = %bucket, url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RequestFailure::Timeout
            } else if e.is_connect() {
                RequestFailure::Unavailable(e.to_string())
            } else {
                RequestFailure::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AnalyticsSource for AnalyticsClient {
    async fn fetch_all(&self) -> FetchResult<RawAnalytics> {
        join_buckets(
            self.series(Bucket::Total),
            self.series(Bucket::RedListed),
            self.series(Bucket::Unlisted),
            self.counter(Bucket::Approved),
            self.counter(Bucket::Rejected),
        )
        .await
    }
}
