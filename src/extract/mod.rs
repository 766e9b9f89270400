//! Extraction strategies
//!
//! Each strategy turns the raw text served at a URL into an ordered list of
//! `DependencyRecord`s. Extraction never fails: input that cannot be
//! understood produces an empty list and a log line.
//!
//! - `ManifestExtractor`: `package.json` documents (valid JSON)
//! - `BundleExtractor`: bundler output with embedded object literals (regex heuristic)

pub mod framework;
pub mod manifest;
pub mod bundle;

pub use framework::{Extractor, Strategy, classify, extract_for_url};
pub use manifest::ManifestExtractor;
pub use bundle::BundleExtractor;
