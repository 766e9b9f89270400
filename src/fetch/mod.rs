//! HTTP fetching
//!
//! The crawler and the takeover prober only need a blocking "GET this URL,
//! give me the status and body" call. `Fetcher` is that seam; `HttpFetcher`
//! implements it with `reqwest`.

pub mod http;

pub use http::{HttpFetcher, HttpFetcherBuilder};

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error, like `raise_for_status`
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status(self.status))
        }
    }
}

/// Why a URL could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("TLS error: {0}")]
    Tls(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unreadable body: {0}")]
    Body(String),
}

/// Trait for blocking HTTP GET clients
pub trait Fetcher {
    /// GET `url`. Any HTTP status is a successful fetch; only failures to
    /// complete the exchange are errors.
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// GET `url` and fail on non-2xx statuses
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.get(url)?.error_for_status()?.body)
    }
}
