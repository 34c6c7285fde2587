//! HTTP request/response types and client trait.

use super::HttpError;

/// An HTTP request to be sent.
///
/// Uses the `http` crate's method and header types so any client
/// implementation can consume it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
}

impl HttpRequest {
    /// Creates a request with no headers.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Adds a header. Repeated names keep every value.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the `User-Agent` header, replacing any previous value.
    ///
    /// Values that are not valid header text are ignored.
    #[must_use]
    pub fn with_user_agent(mut self, agent: &str) -> Self {
        if let Ok(value) = http::HeaderValue::from_str(agent) {
            self.headers.insert(http::header::USER_AGENT, value);
        }
        self
    }
}

/// An HTTP response with a fully buffered (possibly truncated) body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
    /// True if the body was cut at the client's size ceiling
    pub truncated: bool,
}

impl HttpResponse {
    /// Creates a complete (untruncated) response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            truncated: false,
        }
    }

    /// Convenience constructor for a 200 response with a text body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            body.into().into_bytes(),
        )
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    ///
    /// A body truncated mid-character still decodes.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// Implemented by [`ReqwestClient`](super::ReqwestClient) in production and
/// by hand-written mocks in tests.
///
/// # Example
///
/// ```
/// use cfgprobe::fetch::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(&'static str);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::ok(self.0))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
