//! Reporting sink
//!
//! The crawler and the prober describe what happened through a `Reporter`
//! instead of printing. The console implementation lives in `ui::reporter`;
//! tests use a recording one.

use crate::dependency::DependencyRecord;
use crate::fetch::FetchError;
use crate::takeover::TakeoverFinding;

/// How much per-item detail to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Progress bar and summary only
    #[default]
    Normal,
    /// One line per URL / registry response
    Verbose,
    /// Every extracted pair and every registry request
    Advanced,
    /// Advanced output plus debug logging
    Debug,
}

impl Verbosity {
    /// Map a repeated `-v` flag count
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            2 => Verbosity::Advanced,
            _ => Verbosity::Debug,
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Normal => "depgrab=error",
            Verbosity::Verbose => "depgrab=info",
            Verbosity::Advanced => "depgrab=info",
            Verbosity::Debug => "depgrab=debug",
        }
    }
}

/// What happened to one URL during a crawl
#[derive(Debug, Clone, PartialEq)]
pub enum UrlOutcome {
    /// Dependencies were found; `inserted` of them were new to the store
    Stored {
        found: Vec<DependencyRecord>,
        inserted: usize,
    },
    /// The text was fetched but neither strategy found anything
    NoDependencies,
    /// Fetch failed
    FetchFailed(FetchError),
    /// Extraction worked but the store rejected the batch
    StoreFailed(String),
}

impl UrlOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, UrlOutcome::FetchFailed(_) | UrlOutcome::StoreFailed(_))
    }
}

/// Registry answer for one package name
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The registry answered; `unclaimed` is the takeover verdict
    Answered { status: u16, unclaimed: bool },
    /// No usable answer; treated as claimed
    Failed(FetchError),
}

/// Sink for crawl and probe progress
///
/// Every method has an empty default so implementations only handle what
/// they display.
pub trait Reporter {
    fn crawl_started(&mut self, _total: usize) {}

    /// Called exactly once per URL, in input order, whatever the outcome
    fn url_finished(&mut self, _index: usize, _url: &str, _outcome: &UrlOutcome) {}

    fn crawl_finished(&mut self) {}

    fn probe_started(&mut self, _total: usize) {}

    /// Called before the request for `name` is sent
    fn package_probing(&mut self, _name: &str) {}

    /// Called exactly once per package name, in order
    fn package_probed(&mut self, _index: usize, _name: &str, _outcome: &ProbeOutcome) {}

    fn takeover_found(&mut self, _finding: &TakeoverFinding) {}

    fn probe_finished(&mut self) {}
}

/// Reporter that discards everything
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_occurrences() {
        assert_eq!(Verbosity::from_occurrences(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_occurrences(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_occurrences(2), Verbosity::Advanced);
        assert_eq!(Verbosity::from_occurrences(7), Verbosity::Debug);
        assert!(Verbosity::Advanced > Verbosity::Verbose);
    }

    #[test]
    fn test_outcome_failure() {
        assert!(UrlOutcome::FetchFailed(FetchError::Status(503)).is_failure());
        assert!(UrlOutcome::StoreFailed("locked".into()).is_failure());
        assert!(!UrlOutcome::NoDependencies.is_failure());
    }
}
