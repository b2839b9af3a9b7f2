use anyhow::Result;
use tracing::info;

use tripstats::trip_types::TripType;
use tripstats::usage_stats_repo::UsageStatsRepository;
use tripstats::web::PgPool;

/// Print the material usage report as JSON on stdout
pub async fn handle_materials(
    pool: PgPool,
    trip_type: String,
    username: Option<String>,
) -> Result<()> {
    let trip_type: TripType = trip_type.parse()?;
    info!(
        "Computing material usage for {} (trip type {})",
        username.as_deref().unwrap_or("all users"),
        trip_type
    );

    let report = UsageStatsRepository::new(pool)
        .get_material_usage(username, trip_type)
        .await?;

    info!("{} materials", report.len());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print the operator usage report as JSON on stdout
pub async fn handle_operators(pool: PgPool, username: Option<String>) -> Result<()> {
    info!(
        "Computing operator usage for {}",
        username.as_deref().unwrap_or("all users")
    );

    let report = UsageStatsRepository::new(pool)
        .get_operator_usage(username)
        .await?;

    info!("{} operators", report.len());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
