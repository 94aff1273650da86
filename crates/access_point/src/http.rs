use super::{FaxTransport, HttpReply, CONTENT_TYPE};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTPS transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Build a transport whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl FaxTransport for ReqwestTransport {
    async fn post(&self, url: &str, body: String) -> Result<HttpReply> {
        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read eFax response body")?;

        Ok(HttpReply { status, body })
    }
}
