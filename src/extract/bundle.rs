//! Heuristic extraction from JavaScript bundles
//!
//! Bundlers often inline a package's manifest as an object literal, e.g.
//! `dependencies:{"lodash":"4.17.21",react:"18.2.0"}`. This module recovers
//! those pairs with regular expressions. It is not a JavaScript parser.
//!
//! Known failure modes:
//! - A block ends at the first `}`, so nested braces truncate it.
//! - Only double-quoted string versions are recognised.
//! - Computed keys and keys containing `@` or `/` (scoped packages) are not matched.
//! - JSON-style `"dependencies":{...}` keys are not matched, only the
//!   unquoted object-literal form.

use std::sync::LazyLock;
use regex::Regex;
use crate::dependency::{DependencyKind, DependencyRecord};
use super::framework::Extractor;

static DEPENDENCIES_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"dependencies:\{([^}]+)\}").expect("valid regex"));

static DEV_DEPENDENCIES_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"devDependencies:\{([^}]+)\}").expect("valid regex"));

/// Optional leading quote or comma, a name, a colon, a double-quoted version
static DEPENDENCY_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:"|,)?(["\w\-.]+):"([^"]+)""#).expect("valid regex"));

/// Extractor for minified bundle text
pub struct BundleExtractor;

impl Extractor for BundleExtractor {
    fn name(&self) -> &str {
        "bundle"
    }

    fn extract(&self, content: &str) -> Vec<DependencyRecord> {
        let mut records = Vec::new();

        for (kind, block) in [
            (DependencyKind::Direct, &*DEPENDENCIES_BLOCK),
            (DependencyKind::Dev, &*DEV_DEPENDENCIES_BLOCK),
        ] {
            for captures in block.captures_iter(content) {
                parse_block(&captures[1], kind, &mut records);
            }
        }

        records
    }
}

/// Scan the inner text of one `{...}` block for `name:"version"` pairs
fn parse_block(block: &str, kind: DependencyKind, records: &mut Vec<DependencyRecord>) {
    for captures in DEPENDENCY_PAIR.captures_iter(block) {
        let name = captures[1].trim_matches('"');
        let version = &captures[2];

        if name.is_empty() || version.is_empty() {
            tracing::debug!("Ignoring malformed {} pair: {}:{}", kind, name, version);
            continue;
        }

        tracing::trace!("Found {}: {}@{}", kind, name, version);
        records.push(DependencyRecord::new(name, version, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<DependencyRecord> {
        BundleExtractor.extract(content)
    }

    fn direct(name: &str, version: &str) -> DependencyRecord {
        DependencyRecord::new(name, version, DependencyKind::Direct)
    }

    fn dev(name: &str, version: &str) -> DependencyRecord {
        DependencyRecord::new(name, version, DependencyKind::Dev)
    }

    #[test]
    fn test_quoted_keys_in_order() {
        let records = extract(r#"dependencies:{"lodash":"4.17.21","react":"18.2.0"}"#);
        assert_eq!(records, vec![direct("lodash", "4.17.21"), direct("react", "18.2.0")]);
    }

    #[test]
    fn test_unquoted_keys_in_minified_bundle() {
        let content = r#"!function(){var e={name:"app",version:"1.0.0",dependencies:{vue:"^3.4.0",pinia:"2.1.7"},devDependencies:{vite:"5.0.0"}};}"#;
        assert_eq!(
            extract(content),
            vec![direct("vue", "^3.4.0"), direct("pinia", "2.1.7"), dev("vite", "5.0.0")]
        );
    }

    #[test]
    fn test_no_blocks() {
        assert!(extract("console.log('hello')").is_empty());
        assert!(extract("").is_empty());
        assert!(extract("dependencies:{}").is_empty());
    }

    #[test]
    fn test_multiple_blocks_are_unioned() {
        let content = concat!(
            r#"/* a.js */ x={dependencies:{"left-pad":"1.3.0"}};"#,
            r#"/* b.js */ y={dependencies:{"is-odd":"3.0.1",lodash_es:"4.17.21"}};"#,
        );
        assert_eq!(
            extract(content),
            vec![direct("left-pad", "1.3.0"), direct("is-odd", "3.0.1"), direct("lodash_es", "4.17.21")]
        );
    }

    #[test]
    fn test_dev_block_is_not_read_as_direct() {
        let records = extract(r#"devDependencies:{"typescript":"5.3.3"}"#);
        assert_eq!(records, vec![dev("typescript", "5.3.3")]);
    }

    #[test]
    fn test_nested_brace_truncates_block() {
        // The block ends at the first `}`, so `b` is never seen.
        let content = r#"dependencies:{"a":"1.0.0","x":{"y":"z"},"b":"2.0.0"}"#;
        let records = extract(content);
        assert_eq!(records.first(), Some(&direct("a", "1.0.0")));
        assert!(!records.iter().any(|r| r.name == "b"));
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let records = extract(r#"dependencies:{"":"1.0.0","ok":"2.0.0"}"#);
        assert_eq!(records, vec![direct("ok", "2.0.0")]);
    }

    #[test]
    fn test_non_string_versions_are_ignored() {
        let records = extract(r#"dependencies:{a:1,b:"2.0.0",c:null}"#);
        assert_eq!(records, vec![direct("b", "2.0.0")]);
    }
}
