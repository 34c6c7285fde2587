//! Production HTTP client implementation using reqwest.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Default body ceiling: 10 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Production HTTP client using reqwest.
///
/// Bodies are read chunk by chunk and cut at `max_body_bytes`; the
/// remainder of an oversized response is never buffered.
///
/// # Example
///
/// ```no_run
/// use cfgprobe::fetch::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new().with_max_body_bytes(64 * 1024);
/// let url = Url::parse("https://raw.githubusercontent.com/zed-industries/zed/main/README.md")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    max_body_bytes: usize,
}

impl ReqwestClient {
    /// Creates a client with default reqwest configuration and a 10 MiB ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new())
    }

    /// Wraps an existing reqwest client (custom timeouts, proxies, TLS).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the body ceiling.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }

    /// Current body ceiling in bytes.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

/// Appends `chunk` to `body` without exceeding `max`. Returns true if cut.
pub(super) fn append_capped(body: &mut Vec<u8>, chunk: &[u8], max: usize) -> bool {
    let room = max.saturating_sub(body.len());
    if chunk.len() > room {
        body.extend_from_slice(&chunk[..room]);
        true
    } else {
        body.extend_from_slice(chunk);
        false
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        let mut response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers = response.headers().clone();

        let mut body = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await.map_err(map_send_error)? {
            if append_capped(&mut body, &chunk, self.max_body_bytes) {
                truncated = true;
                break;
            }
        }

        if truncated {
            tracing::warn!(
                url = %req.url,
                limit = self.max_body_bytes,
                "Response body truncated at size limit"
            );
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
            truncated,
        })
    }
}
