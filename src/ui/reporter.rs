//! Terminal reporter
//!
//! Renders crawl and probe events with a progress bar. What gets printed per
//! item depends on the verbosity:
//! - `Normal`: failures of registry checks and takeover warnings only
//! - `Verbose`: one line per URL and per registry response
//! - `Advanced`: every extracted `name@version` and every registry request

use owo_colors::OwoColorize;
use crate::fetch::FetchError;
use crate::report::{ProbeOutcome, Reporter, UrlOutcome, Verbosity};
use crate::takeover::TakeoverFinding;
use crate::ui::{theme, Icons, TaskProgress};

pub struct ConsoleReporter {
    verbosity: Verbosity,
    progress: Option<TaskProgress>,
    total: usize,
}

impl ConsoleReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            progress: None,
            total: 0,
        }
    }

    fn start(&mut self, label: &str, total: usize) {
        self.total = total;
        self.progress = Some(TaskProgress::new(label, total));
    }

    fn advance(&self, done: usize) {
        if let Some(progress) = &self.progress {
            progress.advance(done, self.total);
        }
    }

    fn finish(&mut self) {
        if let Some(progress) = self.progress.take() {
            progress.finish();
        }
    }

    fn println(&self, line: String) {
        match &self.progress {
            Some(progress) => progress.println(line),
            None => println!("{}", line),
        }
    }

    fn shows(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }
}

impl Reporter for ConsoleReporter {
    fn crawl_started(&mut self, total: usize) {
        self.start("Crawling", total);
    }

    fn url_finished(&mut self, index: usize, url: &str, outcome: &UrlOutcome) {
        match outcome {
            UrlOutcome::Stored { found, inserted } => {
                if self.shows(Verbosity::Advanced) {
                    for record in found {
                        self.println(format!("  {} {}", Icons::ARROW, record.package_id()).style(theme().detail.clone()).to_string());
                    }
                }
                if self.shows(Verbosity::Verbose) {
                    let line = format!("{} {} ({} new dependencies)", Icons::CHECK, url, inserted);
                    self.println(line.style(theme().success.clone()).to_string());
                }
            }
            UrlOutcome::NoDependencies => {
                if self.shows(Verbosity::Verbose) {
                    let line = format!("{} {} (no dependencies)", Icons::WARN, url);
                    self.println(line.style(theme().warn.clone()).to_string());
                }
            }
            UrlOutcome::FetchFailed(e) => {
                if self.shows(Verbosity::Verbose) {
                    let reason = match e {
                        FetchError::Tls(_) => "TLS error: invalid certificate".to_string(),
                        other => format!("error: {}", other),
                    };
                    let line = format!("{} {} ({})", Icons::CROSS, url, reason);
                    self.println(line.style(theme().error.clone()).to_string());
                }
            }
            UrlOutcome::StoreFailed(e) => {
                if self.shows(Verbosity::Verbose) {
                    let line = format!("{} {} (storage error: {})", Icons::CROSS, url, e);
                    self.println(line.style(theme().error.clone()).to_string());
                }
            }
        }
        self.advance(index);
    }

    fn crawl_finished(&mut self) {
        self.finish();
    }

    fn probe_started(&mut self, total: usize) {
        self.start("Checking packages", total);
    }

    fn package_probing(&mut self, name: &str) {
        if self.shows(Verbosity::Advanced) {
            let line = format!("{} Checking package {}", Icons::MAG, name);
            self.println(line.style(theme().warn.clone()).to_string());
        }
    }

    fn package_probed(&mut self, index: usize, name: &str, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Answered { status, .. } => {
                if self.shows(Verbosity::Verbose) {
                    let line = format!("Registry response for {}: {}", name, status);
                    self.println(line.style(theme().detail.clone()).to_string());
                }
            }
            ProbeOutcome::Failed(e) => {
                let line = format!("{} Error while checking {}: {}", Icons::CROSS, name, e);
                self.println(line.style(theme().error.clone()).to_string());
            }
        }
        self.advance(index);
    }

    fn takeover_found(&mut self, finding: &TakeoverFinding) {
        let mut message = format!(
            "{} Possible takeover for package {}\n  Affected URLs:",
            Icons::WARN,
            finding.package_name
        )
        .style(theme().warn.clone())
        .to_string();
        for url in &finding.affected_urls {
            message.push_str(&format!("\n  - {}", url));
        }
        self.println(message);
    }

    fn probe_finished(&mut self) {
        self.finish();
    }
}
