use anyhow::Result;
use tracing::info;

use tripstats::db::run_migrations;
use tripstats::web::PgPool;

pub async fn handle_migrate(pool: PgPool) -> Result<()> {
    info!("Running database migrations...");
    let applied = run_migrations(pool).await?;

    if applied.is_empty() {
        info!("No pending migrations");
    } else {
        for version in &applied {
            info!("Applied migration {}", version);
        }
        info!("Applied {} migration(s)", applied.len());
    }

    Ok(())
}
