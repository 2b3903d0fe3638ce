pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One persisted lookup attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    pub id: i64,
    /// Raw user text, before translation.
    pub query: String,
    pub success: bool,
    /// Store-assigned creation time (UTC).
    pub timestamp: NaiveDateTime,
}

/// Append-only log of queries and their outcomes.
/// The application only ever writes to it.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Create the backing schema if absent. Safe to call on every start.
    async fn initialize(&self) -> Result<()>;

    /// Append one record. Returns once the row is committed.
    async fn record(&self, query: &str, success: bool) -> Result<()>;
}
