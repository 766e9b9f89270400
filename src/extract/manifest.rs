//! `package.json` extraction
//!
//! Reads the `dependencies` and `devDependencies` objects of a manifest. Both
//! are optional. Key order is preserved (serde_json is built with
//! `preserve_order`). A repeated top-level key keeps its last value.

use serde_json::{Map, Value};
use crate::dependency::{DependencyKind, DependencyRecord};
use super::framework::Extractor;

/// Extractor for structured `package.json` manifests
pub struct ManifestExtractor;

impl Extractor for ManifestExtractor {
    fn name(&self) -> &str {
        "manifest"
    }

    fn extract(&self, content: &str) -> Vec<DependencyRecord> {
        let manifest: Map<String, Value> = match serde_json::from_str(content) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::error!("Invalid package.json: {}", e);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for kind in [DependencyKind::Direct, DependencyKind::Dev] {
            let section = match manifest.get(kind.section()) {
                None | Some(Value::Null) => continue,
                Some(Value::Object(section)) => section,
                Some(_) => {
                    tracing::error!("Invalid package.json: {} is not an object", kind.section());
                    return Vec::new();
                }
            };
            match section_records(kind, section) {
                Some(found) => records.extend(found),
                None => {
                    // A half-read manifest is worse than none
                    tracing::error!("Invalid package.json: {} has a non-string version", kind.section());
                    return Vec::new();
                }
            }
        }

        records
    }
}

/// Records of one section, or `None` when a value is not a string
fn section_records(kind: DependencyKind, section: &Map<String, Value>) -> Option<Vec<DependencyRecord>> {
    let mut records = Vec::with_capacity(section.len());
    for (name, version) in section {
        let version = version.as_str()?;
        if name.is_empty() || version.is_empty() {
            tracing::debug!("Ignoring {} entry with empty field: {:?}:{:?}", kind.section(), name, version);
            continue;
        }
        tracing::trace!("Found {}: {}@{}", kind, name, version);
        records.push(DependencyRecord::new(name.as_str(), version, kind));
    }
    Some(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<DependencyRecord> {
        ManifestExtractor.extract(content)
    }

    #[test]
    fn test_dependencies_and_dev_dependencies() {
        let records = extract(r#"{"dependencies":{"a":"1.0.0"},"devDependencies":{"b":"2.0.0"}}"#);
        assert_eq!(
            records,
            vec![
                DependencyRecord::new("a", "1.0.0", DependencyKind::Direct),
                DependencyRecord::new("b", "2.0.0", DependencyKind::Dev),
            ]
        );
    }

    #[test]
    fn test_invalid_json_yields_nothing() {
        assert!(extract("{invalid json").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_key_order_is_preserved() {
        let records = extract(r#"{"dependencies":{"zod":"3.22.0","axios":"^1.6.0","moment":"~2.29.4"}}"#);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zod", "axios", "moment"]);
    }

    #[test]
    fn test_sections_are_optional() {
        assert!(extract(r#"{"name":"app","version":"1.0.0"}"#).is_empty());

        let records = extract(r#"{"name":"app","devDependencies":{"jest":"^29.0.0"}}"#);
        assert_eq!(records, vec![DependencyRecord::new("jest", "^29.0.0", DependencyKind::Dev)]);
    }

    #[test]
    fn test_non_string_version_discards_whole_manifest() {
        let content = r#"{"dependencies":{"a":"1.0.0","b":{"version":"2"}},"devDependencies":{"c":"3.0.0"}}"#;
        assert!(extract(content).is_empty());
    }

    #[test]
    fn test_non_object_documents() {
        assert!(extract(r#"["dependencies"]"#).is_empty());
        assert!(extract(r#"{"dependencies":["a","b"]}"#).is_empty());
        assert!(extract(r#"[{"a":"1.0.0"},{"b":"2.0.0"}]"#).is_empty());
        assert!(extract(r#""dependencies""#).is_empty());
        assert!(extract("null").is_empty());
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let records = extract(r#"{"dependencies":{"a":"1.0.0"},"dependencies":{"b":"2.0.0"}}"#);
        assert_eq!(records, vec![DependencyRecord::new("b", "2.0.0", DependencyKind::Direct)]);
    }

    #[test]
    fn test_null_section_is_absent() {
        let records = extract(r#"{"dependencies":null,"devDependencies":{"c":"3.0.0"}}"#);
        assert_eq!(records, vec![DependencyRecord::new("c", "3.0.0", DependencyKind::Dev)]);
    }

    #[test]
    fn test_empty_version_is_skipped() {
        let records = extract(r#"{"dependencies":{"a":"","b":"1.2.3"}}"#);
        assert_eq!(records, vec![DependencyRecord::new("b", "1.2.3", DependencyKind::Direct)]);
    }
}
