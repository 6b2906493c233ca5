use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// Builds the pool without connecting; connections are opened on first use
/// so the service can start while the database is still unreachable.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // `content` is BYTEA and `metadata` is serialized JSON text because
    // TEXT and JSONB both reject U+0000, which raw CI output can contain.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS logs (
            id UUID PRIMARY KEY,
            source VARCHAR(20) NOT NULL CHECK (source IN ('github', 'gitlab', 'jenkins')),
            repo TEXT NOT NULL,
            pipeline_id TEXT NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT now(),
            content BYTEA NOT NULL,
            metadata TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
