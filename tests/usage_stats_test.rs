//! Integration tests for the usage statistics reports against PostgreSQL
mod common;

use common::TestDatabase;
use tripstats::trip_types::TripType;
use tripstats::usage_stats::{MaterialUsage, OperatorUsage};
use tripstats::usage_stats_repo::UsageStatsRepository;

const TRIPS: &str = r#"
    INSERT INTO counted (uid, username, material_type, operator, past, "plannedFuture", future) VALUES
        (1, 'alice', 'A320,A330', 'Air France, KLM', 1, 0, 0),
        (2, 'bob',   'A320',      'KLM',             0, 2, 0),
        (3, 'alice', 'B738',      'Ryanair',         5, 0, 1),
        (4, 'bob',   NULL,        '',                1, 0, 0);
"#;

#[tokio::test]
async fn test_material_report_without_airliners() {
    let test_db = TestDatabase::new()
        .await
        .expect("Failed to create test database");
    test_db.execute(TRIPS);

    let repo = UsageStatsRepository::new(test_db.pool());
    let report = repo
        .get_material_usage(None, TripType::Air)
        .await
        .expect("material report");

    assert_eq!(
        report,
        vec![
            MaterialUsage {
                material: "A320".to_string(),
                past: 1,
                planned_future: 2,
                count: 3,
            },
            MaterialUsage {
                material: "A330".to_string(),
                past: 1,
                planned_future: 0,
                count: 1,
            },
            MaterialUsage {
                material: "".to_string(),
                past: 1,
                planned_future: 0,
                count: 1,
            },
        ]
    );
}

#[tokio::test]
async fn test_material_report_resolves_known_aircraft() {
    let test_db = TestDatabase::new()
        .await
        .expect("Failed to create test database");
    test_db.execute(TRIPS);
    test_db.execute(
        "INSERT INTO airliners (iata, manufacturer, model) VALUES ('A320', 'Airbus', 'A320')",
    );

    let repo = UsageStatsRepository::new(test_db.pool());

    let air = repo
        .get_material_usage(None, TripType::Air)
        .await
        .expect("material report");
    let keys: Vec<_> = air.iter().map(|r| r.material.as_str()).collect();
    assert_eq!(keys, vec!["Airbus A320", "A330", ""]);

    let bus = repo
        .get_material_usage(None, TripType::Bus)
        .await
        .expect("material report");
    assert_eq!(bus[0].material, "A320");
}

#[tokio::test]
async fn test_username_filter() {
    let test_db = TestDatabase::new()
        .await
        .expect("Failed to create test database");
    test_db.execute(TRIPS);

    let repo = UsageStatsRepository::new(test_db.pool());

    let trips = repo
        .get_completed_trips(Some("alice".to_string()))
        .await
        .expect("trips");
    assert!(trips.iter().all(|t| t.username == "alice"));
    // Trip 3 is planned (future = 1)
    assert_eq!(trips.len(), 1);

    let operators = repo
        .get_operator_usage(Some("alice".to_string()))
        .await
        .expect("operator report");
    assert_eq!(
        operators,
        vec![
            OperatorUsage {
                operator: "Air France".to_string(),
                past: 1,
                planned_future: 0,
                count: 1,
            },
            OperatorUsage {
                operator: "KLM".to_string(),
                past: 1,
                planned_future: 0,
                count: 1,
            },
        ]
    );
}

#[tokio::test]
async fn test_operator_report_for_all_users() {
    let test_db = TestDatabase::new()
        .await
        .expect("Failed to create test database");
    test_db.execute(TRIPS);

    let repo = UsageStatsRepository::new(test_db.pool());
    let report = repo.get_operator_usage(None).await.expect("operator report");

    assert_eq!(report[0].operator, "KLM");
    assert_eq!((report[0].past, report[0].planned_future, report[0].count), (1, 2, 3));
    assert!(report.windows(2).all(|w| w[0].count >= w[1].count));
    assert!(report.iter().all(|r| r.operator != "Ryanair"));
}
