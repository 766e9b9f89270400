//! Registry takeover checks
//!
//! A package name referenced by a deployed app but missing from the public
//! registry can be registered by anyone, and the next install pulls their
//! code. For every stored name, ask the registry whether it exists.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;
use serde::Serialize;
use crate::Result;
use crate::fetch::{FetchResponse, Fetcher};
use crate::report::{ProbeOutcome, Reporter};
use crate::storage::DependencyStore;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Pause before each registry request
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(200);

/// Body the npm registry sends for a missing package
const NOT_FOUND_BODY: &str = r#"{"error":"Not found"}"#;

/// Verdict for one package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TakeoverFinding {
    pub package_name: String,
    pub flagged_as_unclaimed: bool,
    /// Every stored URL referencing the name, any version
    pub affected_urls: BTreeSet<String>,
}

/// Result of a full probe pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Names queried
    pub checked: usize,
    /// Names whose request failed
    pub errors: usize,
    /// Flagged names only
    pub findings: Vec<TakeoverFinding>,
}

/// True when the registry response means nobody owns the name
pub fn is_unclaimed(response: &FetchResponse) -> bool {
    response.status == 404 || response.body == NOT_FOUND_BODY
}

/// Queries the registry for every package name in a store
pub struct TakeoverProber<'a, F: Fetcher> {
    fetcher: &'a F,
    store: &'a DependencyStore,
    registry_url: String,
    delay: Duration,
}

impl<'a, F: Fetcher> TakeoverProber<'a, F> {
    pub fn new(fetcher: &'a F, store: &'a DependencyStore) -> Self {
        Self {
            fetcher,
            store,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            delay: DEFAULT_PROBE_DELAY,
        }
    }

    pub fn with_registry_url(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = registry_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Metadata endpoint for `name`
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.registry_url, name)
    }

    /// Probe every distinct stored name, one at a time.
    ///
    /// Only reading the name list or the affected URLs can fail; registry
    /// errors are reported and counted, never returned.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<ProbeReport> {
        let names = self.store.distinct_package_names()?;
        tracing::info!("Checking {} unique packages", names.len());

        let mut report = ProbeReport::default();
        reporter.probe_started(names.len());

        for (index, name) in names.iter().enumerate() {
            let outcome = self.probe(name, reporter);
            report.checked += 1;

            let unclaimed = match &outcome {
                ProbeOutcome::Answered { unclaimed, .. } => *unclaimed,
                ProbeOutcome::Failed(e) => {
                    tracing::debug!("Registry check failed for {}: {}", name, e);
                    report.errors += 1;
                    false
                }
            };
            reporter.package_probed(index + 1, name, &outcome);

            if unclaimed {
                let finding = TakeoverFinding {
                    package_name: name.clone(),
                    flagged_as_unclaimed: true,
                    affected_urls: self.store.urls_referencing(name)?,
                };
                tracing::debug!("Possible takeover for package {}", name);
                reporter.takeover_found(&finding);
                report.findings.push(finding);
            }
        }

        reporter.probe_finished();
        Ok(report)
    }

    /// Query the registry for a single name
    pub fn probe(&self, name: &str, reporter: &mut dyn Reporter) -> ProbeOutcome {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        reporter.package_probing(name);
        match self.fetcher.get(&self.package_url(name)) {
            Ok(response) => ProbeOutcome::Answered {
                status: response.status,
                unclaimed: is_unclaimed(&response),
            },
            Err(e) => ProbeOutcome::Failed(e),
        }
    }
}
