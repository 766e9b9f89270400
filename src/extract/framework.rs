//! Extractor trait and strategy selection

use crate::dependency::DependencyRecord;
use super::bundle::BundleExtractor;
use super::manifest::ManifestExtractor;

/// Trait for extraction strategies
///
/// An extractor is a pure function from source text to records. It must not
/// fail: malformed input yields an empty list.
pub trait Extractor {
    /// Strategy name (for display)
    fn name(&self) -> &str;

    /// Extract dependency records from the given text
    fn extract(&self, content: &str) -> Vec<DependencyRecord>;
}

/// Which extractor applies to a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Manifest,
    Bundle,
}

impl Strategy {
    pub fn extractor(&self) -> &'static dyn Extractor {
        match self {
            Strategy::Manifest => &ManifestExtractor,
            Strategy::Bundle => &BundleExtractor,
        }
    }
}

/// Pick a strategy from the URL path: anything ending in `package.json` is a
/// manifest, everything else is treated as a bundle.
///
/// The query string and fragment are not part of the path. A URL that does not
/// parse is matched on its raw text.
pub fn classify(url: &str) -> Strategy {
    let is_manifest = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().ends_with("package.json"),
        Err(_) => url.ends_with("package.json"),
    };

    if is_manifest {
        Strategy::Manifest
    } else {
        Strategy::Bundle
    }
}

/// Classify `url` and run the matching extractor over `content`
pub fn extract_for_url(url: &str, content: &str) -> (Strategy, Vec<DependencyRecord>) {
    let strategy = classify(url);
    let records = strategy.extractor().extract(content);
    tracing::debug!(
        "{} extractor found {} records at {}",
        strategy.extractor().name(),
        records.len(),
        url
    );
    (strategy, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::DependencyKind;

    #[test]
    fn test_classify_by_path_suffix() {
        assert_eq!(classify("https://cdn.example.com/app/package.json"), Strategy::Manifest);
        assert_eq!(classify("https://cdn.example.com/package.json?v=3#top"), Strategy::Manifest);
        assert_eq!(classify("https://cdn.example.com/main.4f2a.js"), Strategy::Bundle);
        assert_eq!(classify("https://cdn.example.com/?file=package.json"), Strategy::Bundle);
        assert_eq!(classify("not a url/package.json"), Strategy::Manifest);
    }

    #[test]
    fn test_extract_for_url_dispatches() {
        let (strategy, records) = extract_for_url(
            "https://example.com/package.json",
            r#"{"dependencies":{"a":"1.0.0"}}"#,
        );
        assert_eq!(strategy, Strategy::Manifest);
        assert_eq!(records, vec![DependencyRecord::new("a", "1.0.0", DependencyKind::Direct)]);

        let (strategy, records) = extract_for_url(
            "https://example.com/vendor.js",
            r#"e.exports={name:"x",dependencies:{"b":"2.0.0"}}"#,
        );
        assert_eq!(strategy, Strategy::Bundle);
        assert_eq!(records, vec![DependencyRecord::new("b", "2.0.0", DependencyKind::Direct)]);
    }
}
