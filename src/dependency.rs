//! Dependency records
//!
//! A `DependencyRecord` is one `name -> version` declaration recovered from a
//! single source text. A `StoredDependency` is the same record once it has been
//! persisted alongside the URL it came from.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a dependency is needed at runtime or only during development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Declared under `dependencies`
    #[serde(rename = "dependency")]
    Direct,
    /// Declared under `devDependencies`
    #[serde(rename = "devDependency")]
    Dev,
}

impl DependencyKind {
    /// String stored in the `type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Direct => "dependency",
            DependencyKind::Dev => "devDependency",
        }
    }

    /// Key of the manifest/bundle object this kind is declared under
    pub fn section(&self) -> &'static str {
        match self {
            DependencyKind::Direct => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }
}

impl FromStr for DependencyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dependency" | "dependencies" | "direct" => Ok(DependencyKind::Direct),
            "devDependency" | "devDependencies" | "dev" => Ok(DependencyKind::Dev),
            _ => Err(Error::Parse(format!("Unknown dependency type: {}", s))),
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dependency declaration as written in the source text.
///
/// Neither the name nor the version is normalized: the name is not checked
/// against npm naming rules and the version may be any range specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
}

impl DependencyRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }

    /// `name@version`, the way npm prints a resolved package
    pub fn package_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// A persisted record plus the URL it was first seen at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDependency {
    pub source_url: String,
    #[serde(flatten)]
    pub record: DependencyRecord,
}

impl StoredDependency {
    pub fn new(source_url: impl Into<String>, record: DependencyRecord) -> Self {
        Self {
            source_url: source_url.into(),
            record,
        }
    }
}
