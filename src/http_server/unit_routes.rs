//! Unit routes: `GET /units/overview`

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::aggregation::AggregationKind;
use crate::result::ResultDocument;

use super::errors::ApiResult;
use super::state::AnalyticsState;

pub fn unit_routes(state: AnalyticsState) -> Router {
    Router::new()
        .route("/overview", get(overview_handler))
        .with_state(state)
}

async fn overview_handler(
    State(state): State<AnalyticsState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ResultDocument>> {
    let document = state
        .aggregate(AggregationKind::UnitsOverview, params)
        .await?;
    Ok(Json(document))
}
