//! Units Overview and Catalog Tests

mod common;

use common::{dec, decimal, int, text, ts, FakeExecutor};

use restaurant_analytics::aggregation::AggregationKind;
use restaurant_analytics::{
    AggregationRequest, AnalyticsEngine, AnalyticsError, RawParams, ResultDocument, SqlValue,
};

fn run(executor: &FakeExecutor, kind: AggregationKind, raw: RawParams) -> ResultDocument {
    let request = AggregationRequest::from_params(kind, &raw).unwrap();
    AnalyticsEngine::new(executor).run(&request).unwrap()
}

// =============================================================================
// Units Overview
// =============================================================================

fn units_executor() -> FakeExecutor {
    FakeExecutor::new()
        .respond(
            "unit_kpis",
            vec![vec![int(3), int(2), dec("900.00"), dec("30")]],
        )
        .respond(
            "unit_listing",
            vec![
                vec![
                    int(1),
                    text("Centro"),
                    SqlValue::Bool(true),
                    dec("600.00"),
                    dec("20"),
                    ts("2024-04-30 22:10:00"),
                ],
                vec![
                    int(2),
                    text("Praia"),
                    SqlValue::Bool(true),
                    dec("300.00"),
                    dec("10"),
                    ts("2024-04-29 13:00:00"),
                ],
                vec![
                    int(3),
                    text("Shopping"),
                    SqlValue::Bool(false),
                    dec("0"),
                    dec("0"),
                    SqlValue::Null,
                ],
            ],
        )
}

#[test]
fn test_units_document() {
    let ResultDocument::UnitsOverview(doc) =
        run(&units_executor(), AggregationKind::UnitsOverview, RawParams::new())
    else {
        panic!("expected units document");
    };

    assert_eq!(doc.kpis.total_unidades, 3);
    assert_eq!(doc.kpis.unidades_ativas, 2);
    assert_eq!(doc.kpis.ticket_medio.value(), decimal("30"));
    assert_eq!(doc.total_registros, 3);

    let centro = &doc.unidades[0];
    assert_eq!(centro.status, "Ativa");
    assert_eq!(centro.pedidos, 20);
    assert_eq!(centro.ticket_medio.value(), decimal("30"));

    let shopping = &doc.unidades[2];
    assert_eq!(shopping.status, "Inativa");
    assert!(shopping.ticket_medio.value().is_zero());
    assert!(shopping.ultima_venda.is_none());
}

/// Each store appears once, even when several of its sales match.
#[test]
fn test_units_listing_groups_sales_per_store() {
    let executor = FakeExecutor::new();
    run(&executor, AggregationKind::UnitsOverview, RawParams::new());

    let listing = executor.call("unit_listing");
    assert!(listing.sql.contains("GROUP BY s.store_id"));
    assert!(listing.sql.contains("LEFT JOIN (SELECT"));
}

/// The status predicate applies to stores, outside the per-store aggregate.
#[test]
fn test_units_status_filter() {
    for (status, active) in [("ativa", true), ("inativa", false)] {
        let executor = FakeExecutor::new();
        run(
            &executor,
            AggregationKind::UnitsOverview,
            RawParams::new().with("status", status),
        );
        for call in executor.calls() {
            assert_eq!(call.params, vec![SqlValue::Bool(active)]);
            assert!(call.sql.contains(") agg ON agg.store_id = st.id WHERE st.is_active = $1"));
        }
    }
}

#[test]
fn test_units_json_status_labels() {
    let json = run(&units_executor(), AggregationKind::UnitsOverview, RawParams::new())
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["unidades"][0]["status"], "Ativa");
    assert_eq!(value["unidades"][0]["ultima_venda"], "2024-04-30T22:10:00");
    assert!(value["unidades"][2]["ultima_venda"].is_null());
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_product_list() {
    let executor = FakeExecutor::new()
        .respond(
            "catalog_page",
            vec![
                vec![int(1), text("Burger"), text("Lanches")],
                vec![int(2), text("Água"), SqlValue::Null],
            ],
        )
        .respond("catalog_count", vec![vec![int(41)]]);

    let ResultDocument::ProductList(doc) = run(
        &executor,
        AggregationKind::ProductList,
        RawParams::new().with("limit", "2"),
    ) else {
        panic!("expected product list");
    };

    assert_eq!(doc.produtos.len(), 2);
    assert_eq!(doc.produtos[1].categoria, "-");
    assert_eq!(doc.total_registros, 41);
    assert_eq!(doc.total_paginas, 21);
    assert_eq!(doc.limit, 2);
}

#[test]
fn test_product_by_id() {
    let executor = FakeExecutor::new()
        .respond("product_by_id", vec![vec![int(7), text("X-Tudo"), text("Lanches")]]);

    let ResultDocument::Product(product) = AnalyticsEngine::new(&executor).product(7).unwrap()
    else {
        panic!("expected product");
    };
    assert_eq!(product.id, 7);
    assert_eq!(product.produto, "X-Tudo");
    assert_eq!(executor.call("product_by_id").params, vec![int(7)]);
}

#[test]
fn test_missing_product_is_not_found() {
    let executor = FakeExecutor::new();
    let err = AnalyticsEngine::new(&executor).product(99).unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound(_)));
    assert_eq!(err.code(), "ANALYTICS_NOT_FOUND");
}

#[test]
fn test_non_positive_product_id_rejected_before_query() {
    let executor = FakeExecutor::new();
    let err = AnalyticsEngine::new(&executor).product(0).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidFilter(_)));
    assert!(executor.calls().is_empty());
}

#[test]
fn test_filter_options() {
    let executor = FakeExecutor::new().respond(
        "store_options",
        vec![vec![int(2), text("Centro")], vec![int(1), text("Praia")]],
    );
    let json = AnalyticsEngine::new(&executor)
        .store_options()
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(json, r#"[{"id":2,"nome":"Centro"},{"id":1,"nome":"Praia"}]"#);
    assert!(executor.call("store_options").sql.contains("ORDER BY st.name ASC"));

    let channels = AnalyticsEngine::new(&executor).channel_options().unwrap();
    assert_eq!(channels, ResultDocument::Options(Vec::new()));
}

#[test]
fn test_money_rounding_half_up() {
    let executor = FakeExecutor::new()
        .respond(
            "kpis",
            vec![vec![int(1), dec("10.005"), int(0), dec("10.005")]],
        );
    let ResultDocument::Overview(doc) =
        run(&executor, AggregationKind::Overview, RawParams::new())
    else {
        panic!("expected overview");
    };
    assert_eq!(doc.kpis.faturamento_total.value(), decimal("10.01"));
}
