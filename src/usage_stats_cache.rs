use std::time::{Duration, Instant};

use anyhow::Result;
use moka::future::Cache;

use crate::trip_types::TripType;
use crate::usage_stats::{MaterialUsage, OperatorUsage};
use crate::usage_stats_repo::UsageStatsRepository;

/// Cache keys for the usage reports
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
enum CacheKey {
    Materials(Option<String>, TripType),
    Operators(Option<String>),
}

/// Cached usage statistics with 60-second TTL
#[derive(Clone)]
pub struct UsageStatsCache {
    repo: UsageStatsRepository,
    materials_cache: Cache<CacheKey, Vec<MaterialUsage>>,
    operators_cache: Cache<CacheKey, Vec<OperatorUsage>>,
}

impl UsageStatsCache {
    pub fn new(repo: UsageStatsRepository) -> Self {
        let ttl = Duration::from_secs(60);
        let max_capacity = 500;

        Self {
            repo,
            materials_cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            operators_cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get_material_usage(
        &self,
        username: Option<String>,
        trip_type: TripType,
    ) -> Result<Vec<MaterialUsage>> {
        let start = Instant::now();
        let key = CacheKey::Materials(username.clone(), trip_type);

        if let Some(cached) = self.materials_cache.get(&key).await {
            metrics::counter!("stats.cache.hit").increment(1);
            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
            metrics::histogram!("stats.query.materials_ms").record(duration_ms);
            return Ok(cached);
        }

        metrics::counter!("stats.cache.miss").increment(1);
        let result = self.repo.get_material_usage(username, trip_type).await?;
        self.materials_cache.insert(key, result.clone()).await;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!("stats.query.materials_ms").record(duration_ms);
        Ok(result)
    }

    pub async fn get_operator_usage(&self, username: Option<String>) -> Result<Vec<OperatorUsage>> {
        let start = Instant::now();
        let key = CacheKey::Operators(username.clone());

        if let Some(cached) = self.operators_cache.get(&key).await {
            metrics::counter!("stats.cache.hit").increment(1);
            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
            metrics::histogram!("stats.query.operators_ms").record(duration_ms);
            return Ok(cached);
        }

        metrics::counter!("stats.cache.miss").increment(1);
        let result = self.repo.get_operator_usage(username).await?;
        self.operators_cache.insert(key, result.clone()).await;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!("stats.query.operators_ms").record(duration_ms);
        Ok(result)
    }
}
