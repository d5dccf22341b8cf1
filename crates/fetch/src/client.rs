//! Origin fetcher implementation

use crate::error::{FetchError, FetchResult};
use imgxform_core::config::FetchConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Raw body and declared type of a fetched source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    /// Complete response body
    pub bytes: Vec<u8>,
    /// `Content-Type` response header, if the origin sent a readable one
    pub content_type: Option<String>,
}

/// HTTP fetcher for source images
///
/// Wraps a `reqwest::Client` configured with:
/// - An overall request timeout and a connect timeout
/// - A cap on the accepted body size
/// - A fixed `User-Agent`
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    inner: Client,
    max_body_bytes: u64,
}

impl Fetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let inner = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            inner,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch `url` with a single GET.
    ///
    /// The URL is checked before any network I/O. Any non-2xx status or
    /// transport failure, including a timeout, is reported as
    /// [`FetchError::NotFound`]. The response is dropped on every return
    /// path, which releases its connection.
    #[instrument(skip(self), fields(status))]
    pub async fn fetch(&self, url: &str) -> FetchResult<FetchedResource> {
        let url = parse_source_url(url)?;
        let start = Instant::now();

        let mut response = self.inner.get(url).send().await.map_err(|e| {
            debug!(error = %e, timeout = e.is_timeout(), connect = e.is_connect(), "Origin request failed");
            FetchError::not_found(e.to_string())
        })?;

        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());

        if !status.is_success() {
            debug!(status = status.as_u16(), "Origin returned non-success status");
            return Err(FetchError::not_found(format!("origin returned {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes {
                debug!(length, limit = self.max_body_bytes, "Declared body length over cap");
                return Err(FetchError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        let capacity = response
            .content_length()
            .unwrap_or(0)
            .min(self.max_body_bytes);
        let mut bytes = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            debug!(error = %e, "Origin body read failed");
            FetchError::not_found(e.to_string())
        })? {
            if (bytes.len() + chunk.len()) as u64 > self.max_body_bytes {
                debug!(limit = self.max_body_bytes, "Streamed body over cap");
                return Err(FetchError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(
            bytes = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            elapsed_ms = start.elapsed().as_millis(),
            "Fetched source"
        );

        Ok(FetchedResource {
            bytes,
            content_type,
        })
    }
}

/// Parse a source URL, accepting only absolute `http` and `https` URLs
pub fn parse_source_url(url: &str) -> FetchResult<Url> {
    let parsed = Url::parse(url).map_err(|e| FetchError::malformed(url, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(FetchError::malformed(url, format!("unsupported scheme {other:?}"))),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::malformed(url, "missing host"));
    }

    Ok(parsed)
}
