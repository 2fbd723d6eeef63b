//! Product routes
//!
//! - `GET /produtos/` paginated catalog, optionally by `category_id`
//! - `GET /produtos/analitico` product performance
//! - `GET /produtos/:produto_id` single catalog product
//!
//! Registered with full paths and merged, so the listing answers both with
//! and without the trailing slash.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::aggregation::AggregationKind;
use crate::filter::InvalidFilterError;
use crate::result::ResultDocument;

use super::errors::ApiResult;
use super::state::AnalyticsState;

pub fn product_routes(state: AnalyticsState) -> Router {
    Router::new()
        .route("/produtos", get(list_handler))
        .route("/produtos/", get(list_handler))
        .route("/produtos/analitico", get(analytic_handler))
        .route("/produtos/:produto_id", get(product_handler))
        .with_state(state)
}

async fn list_handler(
    State(state): State<AnalyticsState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ResultDocument>> {
    let document = state.aggregate(AggregationKind::ProductList, params).await?;
    Ok(Json(document))
}

async fn analytic_handler(
    State(state): State<AnalyticsState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ResultDocument>> {
    let document = state
        .aggregate(AggregationKind::ProductsAnalytic, params)
        .await?;
    Ok(Json(document))
}

async fn product_handler(
    State(state): State<AnalyticsState>,
    Path(produto_id): Path<String>,
) -> ApiResult<Json<ResultDocument>> {
    let id = parse_product_id(&produto_id)?;
    let document = state.with_engine(move |engine| engine.product(id)).await?;
    Ok(Json(document))
}

fn parse_product_id(raw: &str) -> Result<i64, InvalidFilterError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidFilterError::new("produto_id", "must be an integer"))
}
