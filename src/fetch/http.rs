//! `reqwest`-backed fetcher

use std::error::Error as StdError;
use std::time::Duration;
use reqwest::blocking::Client;
use crate::Result;
use super::{FetchError, FetchResponse, Fetcher};

const DEFAULT_USER_AGENT: &str = concat!("depgrab/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Client with the default settings: certificate verification OFF,
    /// transport default timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }
}

/// Settings for `HttpFetcher`
#[derive(Debug, Clone)]
pub struct HttpFetcherBuilder {
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            // Targets are often staging hosts with self-signed certificates
            accept_invalid_certs: true,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpFetcherBuilder {
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<HttpFetcher> {
        if self.accept_invalid_certs {
            tracing::info!("TLS certificate verification is disabled");
        }

        let mut builder = Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> std::result::Result<FetchResponse, FetchError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().map_err(classify_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))?;
        Ok(FetchResponse { status, body })
    }
}

/// Map a `reqwest` error, singling out certificate and handshake failures
fn classify_error(error: reqwest::Error) -> FetchError {
    let message = error_chain(&error);
    if is_tls_failure(&message) {
        FetchError::Tls(message)
    } else {
        FetchError::Transport(message)
    }
}

/// `reqwest` keeps the useful part of the message in the source chain
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_tls_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["certificate", "tls", "ssl", "handshake"]
        .iter()
        .any(|needle| lower.contains(needle))
}
