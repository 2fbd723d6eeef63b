//! Engine Failure and Determinism Tests
//!
//! - Invalid filters fail before any query runs
//! - The first failing plan ends the request with no partial document
//! - Identical inputs give byte-identical output

mod common;

use common::{dec, int, FakeExecutor};

use restaurant_analytics::aggregation::AggregationKind;
use restaurant_analytics::{AggregationRequest, AnalyticsEngine, AnalyticsError, RawParams};

#[test]
fn test_invalid_filter_fails_before_queries() {
    let cases = [
        ("weekday", "7"),
        ("start_hour", "24"),
        ("end_hour", "-1"),
        ("store_id", "0"),
        ("page", "0"),
    ];

    for (key, value) in cases {
        let raw = RawParams::new().with(key, value);
        let err = AggregationRequest::from_params(AggregationKind::SalesDashboard, &raw)
            .map_err(AnalyticsError::from)
            .unwrap_err();
        assert_eq!(err.code(), "ANALYTICS_INVALID_FILTER", "{}={}", key, value);
        assert!(err.is_client_error());
    }
}

#[test]
fn test_reversed_ranges_rejected() {
    let raw = RawParams::new()
        .with("start_date", "2024-02-01")
        .with("end_date", "2024-01-01");
    assert!(AggregationRequest::from_params(AggregationKind::Overview, &raw).is_err());

    let raw = RawParams::new().with("start_hour", "20").with("end_hour", "8");
    let err = AggregationRequest::from_params(AggregationKind::SalesDashboard, &raw).unwrap_err();
    assert_eq!(err.field(), "start_hour");
}

/// Malformed values are treated as absent, not as errors.
#[test]
fn test_unparseable_values_are_absent() {
    let raw = RawParams::new()
        .with("start_date", "yesterday")
        .with("store_id", "abc")
        .with("weekday", "");
    let request = AggregationRequest::from_params(AggregationKind::SalesDashboard, &raw).unwrap();
    assert!(request.filter().is_empty());
}

#[test]
fn test_execution_failure_stops_request() {
    let executor = FakeExecutor::new()
        .respond(
            "kpis",
            vec![vec![int(1), dec("10"), int(0), dec("10")]],
        )
        .fail_on("channel_sales");
    let request =
        AggregationRequest::from_params(AggregationKind::SalesDashboard, &RawParams::new())
            .unwrap();

    let err = AnalyticsEngine::new(&executor).run(&request).unwrap_err();
    match &err {
        AnalyticsError::Execution(e) => {
            assert_eq!(e.plan(), Some("channel_sales"));
            assert!(e.cause().contains("relation does not exist"));
        }
        other => panic!("expected execution error, got {:?}", other),
    }
    assert_eq!(err.code(), "ANALYTICS_EXECUTION_FAILED");
    assert!(!err.is_client_error());

    // plans after the failing one never run
    assert_eq!(
        executor.labels(),
        vec!["kpis", "daily_revenue", "channel_sales"]
    );
}

#[test]
fn test_type_mismatch_is_execution_error() {
    let executor = FakeExecutor::new()
        .respond(
            "kpis",
            vec![vec![common::text("three"), dec("10"), int(0), dec("10")]],
        );
    let request =
        AggregationRequest::from_params(AggregationKind::Overview, &RawParams::new()).unwrap();

    let err = AnalyticsEngine::new(&executor).run(&request).unwrap_err();
    assert!(matches!(err, AnalyticsError::Execution(_)));
}

#[test]
fn test_identical_requests_identical_output() {
    let raw = RawParams::new()
        .with("start_date", "2024-01-01")
        .with("store_id", "2");

    for kind in AggregationKind::ALL {
        let outputs: Vec<String> = (0..2)
            .map(|_| {
                let executor = FakeExecutor::new()
                    .respond(
                        "kpis",
                        vec![vec![int(2), dec("20.5"), int(0), dec("10.25")]],
                    )
                    .respond("product_count", vec![vec![int(4)]]);
                let request = AggregationRequest::from_params(kind, &raw).unwrap();
                AnalyticsEngine::new(&executor)
                    .run(&request)
                    .unwrap()
                    .to_json()
                    .unwrap()
            })
            .collect();
        assert_eq!(outputs[0], outputs[1], "{}", kind);
    }
}

#[test]
fn test_identical_requests_identical_sql() {
    let raw = RawParams::new().with("channel_id", "3").with("weekday", "2");
    let first = FakeExecutor::new();
    let second = FakeExecutor::new();

    for executor in [&first, &second] {
        let request =
            AggregationRequest::from_params(AggregationKind::ProductsAnalytic, &raw).unwrap();
        AnalyticsEngine::new(executor).run(&request).unwrap();
    }

    let sql = |e: &FakeExecutor| e.calls().into_iter().map(|c| c.sql).collect::<Vec<_>>();
    assert_eq!(sql(&first), sql(&second));
}
