// src/services/fetch.rs

//! Retrying page fetcher.
//!
//! A fetch either yields a parsed document or, once the shutdown token
//! fires, `AppError::Cancelled` — transport failures and missing
//! connectivity are logged and retried at a fixed interval, never
//! surfaced to callers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::models::Config;

pub struct Fetcher {
    client: Client,
    config: Arc<Config>,
    shutdown: CancellationToken,
}

impl Fetcher {
    /// Create a fetcher with the configured User-Agent and timeout.
    pub fn new(config: Arc<Config>, shutdown: CancellationToken) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.crawler.user_agent)
            .timeout(Duration::from_secs(config.crawler.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            shutdown,
        })
    }

    /// Fetch a URL and parse it as HTML, retrying until a document is
    /// obtained or the shutdown token is cancelled.
    pub async fn fetch(&self, url: &str) -> Result<Html> {
        let retry = Duration::from_secs(self.config.crawler.retry_interval_secs);
        loop {
            if self.shutdown.is_cancelled() {
                return Err(AppError::Cancelled);
            }

            if !self.is_connected().await {
                log::warn!(
                    "No network connectivity; waiting {}s before retrying {url}",
                    retry.as_secs()
                );
                self.pause(retry).await?;
                continue;
            }

            match self.try_fetch(url).await {
                Ok(document) => return Ok(document),
                Err(e) => {
                    log::error!(
                        "Failed to fetch {url}: {e}; retrying in {}s",
                        retry.as_secs()
                    );
                    self.pause(retry).await?;
                }
            }
        }
    }

    /// Probe network reachability with a bounded TCP connect.
    pub async fn is_connected(&self) -> bool {
        let crawler = &self.config.crawler;
        let timeout = Duration::from_secs(crawler.probe_timeout_secs);
        let probe = TcpStream::connect((crawler.probe_host.as_str(), crawler.probe_port));
        matches!(tokio::time::timeout(timeout, probe).await, Ok(Ok(_)))
    }

    async fn try_fetch(&self, url: &str) -> Result<Html> {
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(Html::parse_document(&text))
    }

    /// Sleep for the retry interval, racing the shutdown token.
    async fn pause(&self, delay: Duration) -> Result<()> {
        tokio::select! {
            () = tokio::time::sleep(delay) => Ok(()),
            () = self.shutdown.cancelled() => Err(AppError::Cancelled),
        }
    }
}
