//! The one sandbox that is genuinely local and in-process: a `rusqlite`
//! relational file store opened read-only unless `allow_write` is set, with
//! a read-only query cache keyed on `(db_path, query)`.

use crate::error::{Result, ToolError};
use mini_moka::sync::Cache;
use rusqlite::{Connection, OpenFlags};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
const CACHE_CAPACITY: u64 = 256;

const WRITE_KEYWORDS: &[&str] = &["insert", "update", "delete", "drop", "alter", "create", "replace", "attach", "pragma"];

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct SqlStore {
    cache: Cache<String, Arc<QueryResult>>,
}

impl Default for SqlStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlStore {
    pub fn new() -> Self {
        Self { cache: Cache::builder().max_capacity(CACHE_CAPACITY).time_to_live(CACHE_TTL).build() }
    }

    /// Runs `query` against the database at `db_path`. Read-only queries are
    /// cached; `allow_write` queries never are.
    pub fn run(&self, db_path: &str, query: &str, allow_write: bool) -> Result<Arc<QueryResult>> {
        validate_statement(query, allow_write)?;

        if !allow_write {
            let key = cache_key(db_path, query);
            if let Some(hit) = self.cache.get(&key) {
                return Ok(hit);
            }
            let result = Arc::new(execute(db_path, query, false)?);
            self.cache.insert(key, result.clone());
            return Ok(result);
        }

        Ok(Arc::new(execute(db_path, query, true)?))
    }

    pub fn schema(&self, db_path: &str) -> Result<Arc<QueryResult>> {
        self.run(db_path, "SELECT name, sql FROM sqlite_master WHERE type='table'", false)
    }
}

fn validate_statement(query: &str, allow_write: bool) -> Result<()> {
    if allow_write {
        return Ok(());
    }

    let statements: Vec<&str> = query.split(';').map(str::trim).filter(|s| !s.is_empty()).collect();
    if statements.len() > 1 {
        return Err(ToolError::SandboxError("multi-statement queries are rejected".to_string()));
    }

    let lowered = query.to_ascii_lowercase();
    if let Some(keyword) = WRITE_KEYWORDS.iter().find(|k| contains_word(&lowered, k)) {
        return Err(ToolError::SandboxError(format!("write keyword '{keyword}' requires allow_write")));
    }

    Ok(())
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.split(|c: char| !c.is_alphanumeric() && c != '_').any(|word| word == needle)
}

fn execute(db_path: &str, query: &str, allow_write: bool) -> Result<QueryResult> {
    let flags = if allow_write {
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    } else {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    };

    let conn = Connection::open_with_flags(db_path, flags).map_err(|e| ToolError::SandboxError(e.to_string()))?;
    let mut stmt = conn.prepare(query).map_err(|e| ToolError::SandboxError(e.to_string()))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..column_count).map(|i| row.get::<_, rusqlite::types::Value>(i).map(value_to_string)).collect::<rusqlite::Result<Vec<String>>>()
        })
        .map_err(|e| ToolError::SandboxError(e.to_string()))?
        .collect::<rusqlite::Result<Vec<Vec<String>>>>()
        .map_err(|e| ToolError::SandboxError(e.to_string()))?;

    Ok(QueryResult { columns, rows })
}

fn value_to_string(value: rusqlite::types::Value) -> String {
    use rusqlite::types::Value;
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

fn cache_key(db_path: &str, query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(db_path.as_bytes());
    hasher.update(b"\0");
    hasher.update(query.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db(dir: &std::path::Path) -> String {
        let path = dir.join("test.db").to_string_lossy().to_string();
        let conn = Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE users (id INTEGER, name TEXT)", []).unwrap();
        conn.execute("INSERT INTO users VALUES (1, 'ada')", []).unwrap();
        path
    }

    #[test]
    fn read_only_query_returns_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(dir.path());
        let store = SqlStore::new();
        let result = store.run(&path, "SELECT name FROM users", false).unwrap();
        assert_eq!(result.rows, vec![vec!["ada".to_string()]]);
    }

    #[test]
    fn rejects_write_keyword_without_allow_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(dir.path());
        let store = SqlStore::new();
        let result = store.run(&path, "DELETE FROM users", false);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_multi_statement_queries() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(dir.path());
        let store = SqlStore::new();
        let result = store.run(&path, "SELECT 1; SELECT 2", false);
        assert!(result.is_err());
    }

    #[test]
    fn allow_write_permits_insert() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(dir.path());
        let store = SqlStore::new();
        store.run(&path, "INSERT INTO users VALUES (2, 'grace')", true).unwrap();
        let result = store.run(&path, "SELECT name FROM users ORDER BY id", false).unwrap();
        assert_eq!(result.rows.len(), 2);
    }
}
