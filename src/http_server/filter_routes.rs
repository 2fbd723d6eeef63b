//! Filter option routes
//!
//! Lists the stores and channels a dashboard can filter by, ordered by name.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::result::ResultDocument;

use super::errors::ApiResult;
use super::state::AnalyticsState;

pub fn filter_routes(state: AnalyticsState) -> Router {
    Router::new()
        .route("/lojas", get(stores_handler))
        .route("/canais", get(channels_handler))
        .with_state(state)
}

async fn stores_handler(State(state): State<AnalyticsState>) -> ApiResult<Json<ResultDocument>> {
    let document = state.with_engine(|engine| engine.store_options()).await?;
    Ok(Json(document))
}

async fn channels_handler(State(state): State<AnalyticsState>) -> ApiResult<Json<ResultDocument>> {
    let document = state.with_engine(|engine| engine.channel_options()).await?;
    Ok(Json(document))
}
