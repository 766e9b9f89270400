//! Database schema definitions

/// SQL to create the dependencies table
///
/// Column layout is shared with databases written by earlier versions of the
/// tool, which had no index at all.
pub const CREATE_DEPENDENCIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dependencies (
    url TEXT,
    name TEXT,
    version TEXT,
    type TEXT
)
"#;

/// One row per (name, version)
///
/// Fails on a database that already holds duplicate pairs; those get
/// `CREATE_NAME_VERSION_LOOKUP_INDEX` instead.
pub const CREATE_NAME_VERSION_UNIQUE_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_dependencies_name_version ON dependencies(name, version)";

/// Non-unique fallback for databases with duplicate pairs
pub const CREATE_NAME_VERSION_LOOKUP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_dependencies_name_version_lookup ON dependencies(name, version)";

/// SQL to create the remaining indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_dependencies_url ON dependencies(url)",
];

/// Statements that always succeed on any database with this column layout
pub fn base_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_DEPENDENCIES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
