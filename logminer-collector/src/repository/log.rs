//! Log Repository
//!
//! Handles all database operations related to uploaded logs.

use async_trait::async_trait;
use logminer_core::domain::log::{LogRecord, LogSource};
use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::db;

/// Errors raised by a [`LogStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Persistence backend for log records
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persists a record with a single atomic write
    async fn insert(&self, record: &LogRecord) -> Result<(), StoreError>;

    /// Loads a previously persisted record
    ///
    /// No endpoint reads records back yet; only tests call this.
    #[allow(dead_code)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LogRecord>, StoreError>;
}

/// Postgres-backed [`LogStore`]
///
/// The `logs` table is created on first use and creation is retried on later
/// requests until it succeeds.
pub struct PgLogStore {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    /// Creates the `logs` table if it has not been created yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| db::run_migrations(&self.pool))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn insert(&self, record: &LogRecord) -> Result<(), StoreError> {
        self.ensure_schema().await?;

        let metadata = record.metadata.as_ref().map(|m| m.to_string());

        sqlx::query(
            r#"
            INSERT INTO logs (id, source, repo, pipeline_id, timestamp, content, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(record.source.as_str())
        .bind(&record.repo)
        .bind(&record.pipeline_id)
        .bind(record.timestamp)
        .bind(record.content.as_bytes())
        .bind(metadata)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LogRecord>, StoreError> {
        self.ensure_schema().await?;

        let row = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, source, repo, pipeline_id, timestamp, content, metadata
            FROM logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(LogRecord::try_from).transpose()
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    source: String,
    repo: String,
    pipeline_id: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    content: Vec<u8>,
    metadata: Option<String>,
}

impl TryFrom<LogRow> for LogRecord {
    type Error = StoreError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let source = row
            .source
            .parse::<LogSource>()
            .map_err(|e| StoreError::Corrupt(format!("log {}: {}", row.id, e)))?;

        let content = String::from_utf8(row.content)
            .map_err(|e| StoreError::Corrupt(format!("log {}: {}", row.id, e)))?;

        let metadata = row
            .metadata
            .map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(|e| StoreError::Corrupt(format!("log {}: {}", row.id, e)))?;

        Ok(LogRecord {
            id: row.id,
            source,
            repo: row.repo,
            pipeline_id: row.pipeline_id,
            timestamp: row.timestamp,
            content,
            metadata,
        })
    }
}
