//! Test doubles shared by the crawler and prober tests

use std::cell::RefCell;
use std::collections::HashMap;
use crate::fetch::{FetchError, FetchResponse, Fetcher};
use crate::report::{ProbeOutcome, Reporter, UrlOutcome};
use crate::takeover::TakeoverFinding;

/// Fetcher answering from a fixed URL table; unknown URLs fail in transport
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Result<FetchResponse, FetchError>>,
    pub requested: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(FetchResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }
}

impl Fetcher for ScriptedFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Transport(format!("no route to {}", url))))
    }
}

/// Reporter that keeps every event
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub crawl_total: Option<usize>,
    pub urls: Vec<(usize, String, UrlOutcome)>,
    pub crawl_done: bool,
    pub probe_total: Option<usize>,
    pub probing: Vec<String>,
    pub probes: Vec<(usize, String, ProbeOutcome)>,
    pub findings: Vec<TakeoverFinding>,
    pub probe_done: bool,
}

impl Reporter for RecordingReporter {
    fn crawl_started(&mut self, total: usize) {
        self.crawl_total = Some(total);
    }

    fn url_finished(&mut self, index: usize, url: &str, outcome: &UrlOutcome) {
        self.urls.push((index, url.to_string(), outcome.clone()));
    }

    fn crawl_finished(&mut self) {
        self.crawl_done = true;
    }

    fn probe_started(&mut self, total: usize) {
        self.probe_total = Some(total);
    }

    fn package_probing(&mut self, name: &str) {
        self.probing.push(name.to_string());
    }

    fn package_probed(&mut self, index: usize, name: &str, outcome: &ProbeOutcome) {
        self.probes.push((index, name.to_string(), outcome.clone()));
    }

    fn takeover_found(&mut self, finding: &TakeoverFinding) {
        self.findings.push(finding.clone());
    }

    fn probe_finished(&mut self) {
        self.probe_done = true;
    }
}
