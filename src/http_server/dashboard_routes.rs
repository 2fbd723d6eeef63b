//! Dashboard routes
//!
//! `GET /dashboard/overview` and `GET /dashboard/sales`. Query parameters are
//! the raw filter strings; validation happens in the aggregation request.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::aggregation::AggregationKind;
use crate::result::ResultDocument;

use super::errors::ApiResult;
use super::state::AnalyticsState;

pub fn dashboard_routes(state: AnalyticsState) -> Router {
    Router::new()
        .route("/overview", get(overview_handler))
        .route("/sales", get(sales_handler))
        .with_state(state)
}

async fn overview_handler(
    State(state): State<AnalyticsState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ResultDocument>> {
    let document = state.aggregate(AggregationKind::Overview, params).await?;
    Ok(Json(document))
}

async fn sales_handler(
    State(state): State<AnalyticsState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ResultDocument>> {
    let document = state
        .aggregate(AggregationKind::SalesDashboard, params)
        .await?;
    Ok(Json(document))
}
