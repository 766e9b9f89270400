//! # depgrab - npm dependency harvester
//!
//! Pulls npm dependency declarations out of remote `package.json` manifests
//! and minified JavaScript bundles, and flags package names that look
//! unclaimed on the public registry.
//!
//! depgrab provides:
//! - Two extraction strategies: structured manifests and heuristic bundle scanning
//! - SQLite-backed storage deduplicated on (name, version)
//! - A sequential crawler with per-URL error isolation
//! - A takeover prober against the npm registry

pub mod dependency;
pub mod extract;
pub mod storage;
pub mod fetch;
pub mod report;
pub mod crawler;
pub mod takeover;
pub mod urls;
pub mod config;
pub mod ui;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use dependency::{DependencyKind, DependencyRecord, StoredDependency};
pub use storage::DependencyStore;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use report::{Reporter, Verbosity};
pub use crawler::{CrawlSummary, Crawler};
pub use takeover::{ProbeReport, TakeoverFinding, TakeoverProber};

/// Result type alias for depgrab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for depgrab operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
