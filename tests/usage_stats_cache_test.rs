//! Integration tests for the cached usage reports against PostgreSQL
mod common;

use common::TestDatabase;
use tripstats::trip_types::TripType;
use tripstats::usage_stats_cache::UsageStatsCache;
use tripstats::usage_stats_repo::UsageStatsRepository;

#[tokio::test]
async fn test_repeated_report_is_served_from_cache() {
    let test_db = TestDatabase::new()
        .await
        .expect("Failed to create test database");
    test_db.execute(
        "INSERT INTO counted (uid, username, material_type, operator, past, \"plannedFuture\", future) \
         VALUES (1, 'alice', 'A320', 'KLM', 1, 0, 0)",
    );

    let cache = UsageStatsCache::new(UsageStatsRepository::new(test_db.pool()));

    let first = cache
        .get_material_usage(Some("alice".to_string()), TripType::Air)
        .await
        .expect("material report");
    assert_eq!(first[0].count, 1);

    test_db.execute(
        "INSERT INTO counted (uid, username, material_type, operator, past, \"plannedFuture\", future) \
         VALUES (2, 'alice', 'A320', 'KLM', 1, 0, 0)",
    );

    // Same key within the TTL: the stale report is returned
    let second = cache
        .get_material_usage(Some("alice".to_string()), TripType::Air)
        .await
        .expect("material report");
    assert_eq!(second, first);

    // Different keys miss the cache and see the new trip
    let all_users = cache
        .get_material_usage(None, TripType::Air)
        .await
        .expect("material report");
    assert_eq!(all_users[0].count, 2);

    let bus = cache
        .get_material_usage(Some("alice".to_string()), TripType::Bus)
        .await
        .expect("material report");
    assert_eq!(bus[0].count, 2);

    let operators = cache
        .get_operator_usage(Some("alice".to_string()))
        .await
        .expect("operator report");
    assert_eq!(operators[0].count, 2);
}
