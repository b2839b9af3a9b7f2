use anyhow::{Context, Result, anyhow};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::web::PgPool;

// Embed migrations into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

/// Create the shared diesel connection pool
pub fn create_pool(database_url: &str, max_size: u32) -> Result<PgPool> {
    info!("Creating database connection pool (max_size={})", max_size);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database connection pool")
}

/// Run pending migrations, returning the versions that were applied
pub async fn run_migrations(pool: PgPool) -> Result<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .context("Failed to get connection for migrations")?;
        let conn: &mut PgConnection = &mut conn;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
        Ok(applied.into_iter().map(|v| v.to_string()).collect())
    })
    .await?
}
