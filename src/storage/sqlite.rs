//! SQLite storage implementation

use std::collections::BTreeSet;
use std::path::Path;
use rusqlite::{Connection, ErrorCode, params};
use crate::{Result, Error};
use crate::dependency::{DependencyKind, DependencyRecord, StoredDependency};
use super::schema;

/// SQLite-backed store of discovered dependencies
pub struct DependencyStore {
    conn: Connection,
}

impl DependencyStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the table and indexes if they are missing. Safe to call on
    /// every run; existing rows are never touched.
    ///
    /// A database that already holds duplicate (name, version) rows cannot
    /// take the unique index and gets a plain one instead.
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::base_schema_statements() {
            self.conn.execute(stmt, [])?;
        }

        match self.conn.execute(schema::CREATE_NAME_VERSION_UNIQUE_INDEX, []) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                tracing::warn!("Database holds duplicate (name, version) rows, keeping them");
                self.conn.execute(schema::CREATE_NAME_VERSION_LOOKUP_INDEX, [])?;
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!("Schema ready");
        Ok(())
    }

    // ========== Write Operations ==========

    /// Insert every record whose (name, version) pair is not stored yet.
    ///
    /// Returns how many rows were actually added. The source URL and kind are
    /// not part of the identity, so a pair already seen at another URL is
    /// skipped. The existence check does not rely on the unique index, which
    /// older databases may lack.
    pub fn insert_if_new(&self, source_url: &str, records: &[DependencyRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO dependencies (url, name, version, type)
                SELECT ?1, ?2, ?3, ?4
                WHERE NOT EXISTS (SELECT 1 FROM dependencies WHERE name = ?2 AND version = ?3)
                "#,
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    source_url,
                    record.name,
                    record.version,
                    record.kind.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("{} of {} dependencies were new for {}", inserted, records.len(), source_url);
        Ok(inserted)
    }

    // ========== Read Operations ==========

    /// Every package name in the store, regardless of version or kind
    pub fn distinct_package_names(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT name FROM dependencies")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<String>>>()?;
        Ok(names)
    }

    /// Every URL a stored record for `name` was found at, across all versions
    pub fn urls_referencing(&self, name: &str) -> Result<BTreeSet<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT url FROM dependencies WHERE name = ?1")?;
        let urls = stmt
            .query_map([name], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<String>>>()?;
        Ok(urls)
    }

    /// Full table scan in insertion order
    ///
    /// Rows with a NULL column (older versions stored `"a": null` manifest
    /// entries as-is) are skipped.
    pub fn all_records(&self) -> Result<Vec<StoredDependency>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, name, version, type FROM dependencies ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| self.row_to_dependency(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let total = rows.len();
        let records: Vec<_> = rows.into_iter().flatten().collect();
        if records.len() < total {
            tracing::debug!("Skipped {} incomplete rows", total - records.len());
        }
        Ok(records)
    }

    /// Count all stored records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM dependencies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Aggregate counts for the end-of-run summary
    pub fn stats(&self) -> Result<StoreStats> {
        let (records, packages, urls, dev): (i64, i64, i64, i64) = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COUNT(DISTINCT name),
                   COUNT(DISTINCT url),
                   COALESCE(SUM(CASE WHEN type = ?1 THEN 1 ELSE 0 END), 0)
            FROM dependencies
            "#,
            [DependencyKind::Dev.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        Ok(StoreStats {
            records: records as usize,
            packages: packages as usize,
            urls: urls as usize,
            dev: dev as usize,
        })
    }

    /// Helper to convert a row to a StoredDependency, `None` if any column is NULL
    fn row_to_dependency(&self, row: &rusqlite::Row) -> rusqlite::Result<Option<StoredDependency>> {
        let url: Option<String> = row.get(0)?;
        let name: Option<String> = row.get(1)?;
        let version: Option<String> = row.get(2)?;
        let kind_str: Option<String> = row.get(3)?;

        let (Some(url), Some(name), Some(version), Some(kind_str)) = (url, name, version, kind_str) else {
            return Ok(None);
        };
        let kind: DependencyKind = kind_str.parse().map_err(|e: Error| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Some(StoredDependency::new(url, DependencyRecord::new(name, version, kind))))
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub records: usize,
    pub packages: usize,
    pub urls: usize,
    pub dev: usize,
}

impl StoreStats {
    pub fn direct(&self) -> usize {
        self.records - self.dev
    }
}
