//! Upstream movie catalog client
//!
//! The catalog is a paginated, basic-auth protected JSON endpoint. Pages are
//! passed through untouched; callers pick movie records out of them and feed
//! them to ingestion.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::{CatalogCredentials, Config},
    error::{AppError, AppResult},
};

/// Source of catalog pages
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page of the catalog, retrying transient failures
    async fn fetch_page(&self, page: u32, credentials: &CatalogCredentials) -> AppResult<Value>;
}

/// Fixed-delay retry policy: no jitter, no exponential growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    http_client: HttpClient,
    url: String,
    policy: RetryPolicy,
}

impl CatalogClient {
    /// Creates a client whose every attempt is bounded by `timeout`
    pub fn new(url: String, timeout: Duration, policy: RetryPolicy) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            url,
            policy,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.catalog_url.clone(),
            config.catalog_timeout(),
            RetryPolicy {
                max_attempts: config.catalog_max_attempts,
                delay: config.catalog_retry_delay(),
            },
        )
    }

    async fn fetch_once(
        &self,
        page: u32,
        credentials: &CatalogCredentials,
    ) -> Result<Value, reqwest::Error> {
        self.http_client
            .get(&self.url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .query(&[("page", page)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait::async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_page(&self, page: u32, credentials: &CatalogCredentials) -> AppResult<Value> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.fetch_once(page, credentials).await {
                Ok(body) => {
                    tracing::debug!(page, attempt, "Catalog page fetched");
                    return Ok(body);
                }
                Err(e) => {
                    tracing::error!(
                        page,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Catalog fetch attempt failed"
                    );

                    if attempt >= max_attempts {
                        return Err(AppError::UpstreamUnavailable(e.to_string()));
                    }

                    // suspends this task only
                    tokio::time::sleep(self.policy.delay).await;
                }
            }
        }
    }
}
