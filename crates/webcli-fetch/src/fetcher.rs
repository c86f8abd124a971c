//! Document retrieval

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::error::FetchError;
use crate::Result;

/// Receives download progress as a percentage in `0..=100`.
pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<u8>;

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub follow_redirects: bool,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            follow_redirects: true,
            timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects
    pub url: String,
    pub body: String,
}

/// Source of HTML documents.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(
        &self,
        request: &FetchRequest,
        progress: Option<ProgressSender>,
    ) -> Result<FetchedDocument>;
}

/// [`PageFetcher`] over HTTP(S).
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
}

impl HttpFetcher {
    /// `use_system_proxy = false` ignores `HTTP_PROXY` and friends.
    pub fn new(user_agent: &str, redirect_limit: usize, use_system_proxy: bool) -> Result<Self> {
        let build = |policy: Policy| {
            let mut builder = reqwest::Client::builder()
                .redirect(policy)
                .user_agent(user_agent);
            if !use_system_proxy {
                builder = builder.no_proxy();
            }
            builder
                .build()
                .map_err(|e| FetchError::Transport(e.to_string()))
        };

        Ok(Self {
            client: build(Policy::limited(redirect_limit))?,
            no_redirect_client: build(Policy::none())?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        request: &FetchRequest,
        progress: Option<ProgressSender>,
    ) -> Result<FetchedDocument> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(request.timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        };

        report(&progress, 0);

        let response = client
            .get(request.url.as_str())
            .timeout(request.timeout)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!(url = %request.url, status = status.as_u16(), "Fetch returned error status");
            return Err(FetchError::Status {
                code: status.as_u16(),
                message: format!("HTTP error fetching URL: {}", status),
            });
        }

        let final_url = response.url().to_string();
        let total = response.content_length().filter(|len| *len > 0);

        let mut body = Vec::new();
        let mut last_percent = 0u8;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_err)?;
            body.extend_from_slice(&chunk);

            if let Some(total) = total {
                let percent = (body.len() as u64 * 100 / total).min(100) as u8;
                if percent != last_percent {
                    last_percent = percent;
                    report(&progress, percent);
                }
            }
        }

        if last_percent != 100 {
            report(&progress, 100);
        }

        tracing::info!(
            url = %request.url,
            final_url = %final_url,
            bytes = body.len(),
            "Fetched document"
        );

        Ok(FetchedDocument {
            url: final_url,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

fn report(progress: &Option<ProgressSender>, percent: u8) {
    if let Some(tx) = progress {
        // The receiver going away only means nobody is watching anymore.
        let _ = tx.send(percent);
    }
}
