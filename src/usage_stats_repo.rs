use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sql_types::{Array, BigInt, Nullable, Text};
use tracing::debug;

use crate::trip_types::TripType;
use crate::usage_stats::*;
use crate::web::PgPool;

/// Reads completed trips and reference aircraft, and turns them into usage
/// reports.
///
/// The `counted` and `airliners` relations are owned by the trip-logging
/// application; this repository only reads them.
#[derive(Clone)]
pub struct UsageStatsRepository {
    pool: PgPool,
}

impl UsageStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Completed (`future = 0`) trips, optionally restricted to one user
    pub async fn get_completed_trips(&self, username: Option<String>) -> Result<Vec<TripUsage>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            #[derive(QueryableByName)]
            struct Row {
                #[diesel(sql_type = BigInt)]
                uid: i64,
                #[diesel(sql_type = Text)]
                username: String,
                #[diesel(sql_type = Text)]
                material_type: String,
                #[diesel(sql_type = Text)]
                operator: String,
                #[diesel(sql_type = BigInt)]
                past: i64,
                #[diesel(sql_type = BigInt)]
                planned_future: i64,
            }

            let results = diesel::sql_query(
                "SELECT uid::BIGINT AS uid,
                        COALESCE(username, '') AS username,
                        COALESCE(material_type, '') AS material_type,
                        COALESCE(operator, '') AS operator,
                        COALESCE(past, 0)::BIGINT AS past,
                        COALESCE(\"plannedFuture\", 0)::BIGINT AS planned_future
                 FROM counted
                 WHERE future = 0
                   AND ($1::TEXT IS NULL OR username = $1)
                 ORDER BY uid ASC",
            )
            .bind::<Nullable<Text>, _>(username)
            .load::<Row>(&mut conn)
            .context("Failed to load completed trips")?;

            Ok(results
                .into_iter()
                .map(|r| TripUsage {
                    uid: r.uid,
                    username: r.username,
                    material_type: r.material_type,
                    operator: r.operator,
                    past: r.past,
                    planned_future: r.planned_future,
                })
                .collect())
        })
        .await?
    }

    /// Reference aircraft for the given IATA codes
    pub async fn get_airliners(&self, codes: Vec<String>) -> Result<AirlinerLookup> {
        if codes.is_empty() {
            return Ok(AirlinerLookup::new());
        }

        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            #[derive(QueryableByName)]
            struct Row {
                #[diesel(sql_type = Text)]
                iata: String,
                #[diesel(sql_type = Text)]
                manufacturer: String,
                #[diesel(sql_type = Text)]
                model: String,
            }

            let results = diesel::sql_query(
                "SELECT iata,
                        COALESCE(manufacturer, '') AS manufacturer,
                        COALESCE(model, '') AS model
                 FROM airliners
                 WHERE iata = ANY($1)",
            )
            .bind::<Array<Text>, _>(codes)
            .load::<Row>(&mut conn)
            .context("Failed to load airliners")?;

            Ok(results
                .into_iter()
                .map(|r| {
                    (
                        r.iata.clone(),
                        Airliner {
                            iata: r.iata,
                            manufacturer: r.manufacturer,
                            model: r.model,
                        },
                    )
                })
                .collect())
        })
        .await?
    }

    /// Material usage report; aircraft codes are resolved for air and
    /// helicopter trips
    pub async fn get_material_usage(
        &self,
        username: Option<String>,
        trip_type: TripType,
    ) -> Result<Vec<MaterialUsage>> {
        let trips = self.get_completed_trips(username).await?;

        let lookup = if trip_type.resolves_aircraft() {
            self.get_airliners(material_codes(&trips)).await?
        } else {
            AirlinerLookup::new()
        };

        debug!(
            "Aggregating materials over {} trips ({} known airliners, trip type {})",
            trips.len(),
            lookup.len(),
            trip_type
        );

        Ok(aggregate_materials(&trips, trip_type, &lookup))
    }

    /// Operator usage report
    pub async fn get_operator_usage(&self, username: Option<String>) -> Result<Vec<OperatorUsage>> {
        let trips = self.get_completed_trips(username).await?;
        debug!("Aggregating operators over {} trips", trips.len());
        Ok(aggregate_operators(&trips))
    }
}
