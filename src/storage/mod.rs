//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - dependencies(url, name, version, type)
//!
//! A (name, version) pair is stored once. The first URL to report it wins.

pub mod schema;
pub mod sqlite;

pub use sqlite::{DependencyStore, StoreStats};
