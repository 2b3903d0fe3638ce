use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, params};

use super::{AuditStore, SearchRecord};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed audit log.
///
/// Holds only the file path. Every operation opens its own connection and
/// drops it before returning, so concurrent requests never share one.
pub struct SqliteAuditStore {
    path: PathBuf,
}

impl SqliteAuditStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(path: &Path) -> Result<Connection> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open audit database {}", path.display()))?;
        // Concurrent requests each hold their own connection; wait out writers.
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// The last `limit` records, oldest first. Inspection helper; the bot
    /// itself never reads the log.
    pub async fn recent(&self, limit: usize) -> Result<Vec<SearchRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<SearchRecord>> {
            let conn = Self::connect(&path)?;
            let mut stmt = conn.prepare(
                "SELECT id, query, success, timestamp FROM (
                    SELECT id, query, success, timestamp FROM search_history
                    ORDER BY id DESC LIMIT ?1
                ) ORDER BY id ASC",
            )?;
            let records = stmt
                .query_map([limit as i64], |row| {
                    Ok(SearchRecord {
                        id: row.get(0)?,
                        query: row.get(1)?,
                        success: row.get(2)?,
                        timestamp: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await?
    }
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
    async fn initialize(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connect(&path)?;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS search_history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    query TEXT,
                    success BOOLEAN,
                    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
                );",
            )
            .context("failed to create search_history table")?;
            Ok(())
        })
        .await?
    }

    async fn record(&self, query: &str, success: bool) -> Result<()> {
        let path = self.path.clone();
        let query = query.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connect(&path)?;
            conn.execute(
                "INSERT INTO search_history (query, success) VALUES (?1, ?2)",
                params![query, success],
            )
            .context("failed to write search record")?;
            Ok(())
        })
        .await?
    }
}
