//! Shared route state
//!
//! The engine is synchronous and the executor blocks on the runtime, so every
//! engine call runs on the blocking pool.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregation::{AggregationKind, AggregationRequest, AnalyticsEngine};
use crate::error::AnalyticsResult;
use crate::executor::QueryExecutor;
use crate::filter::RawParams;
use crate::result::ResultDocument;

use super::errors::{ApiError, ApiResult};

/// Executor shared by all handlers
#[derive(Clone)]
pub struct AnalyticsState {
    executor: Arc<dyn QueryExecutor>,
}

impl AnalyticsState {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Run `work` against a fresh engine on the blocking pool
    pub async fn with_engine<F>(&self, work: F) -> ApiResult<ResultDocument>
    where
        F: FnOnce(&AnalyticsEngine<'_, dyn QueryExecutor>) -> AnalyticsResult<ResultDocument>
            + Send
            + 'static,
    {
        let executor = Arc::clone(&self.executor);
        let outcome = tokio::task::spawn_blocking(move || {
            let engine = AnalyticsEngine::new(executor.as_ref());
            work(&engine)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(outcome?)
    }

    /// Validate query parameters and run one aggregation kind
    pub async fn aggregate(
        &self,
        kind: AggregationKind,
        params: HashMap<String, String>,
    ) -> ApiResult<ResultDocument> {
        let request = AggregationRequest::from_params(kind, &RawParams::from(params))?;
        self.with_engine(move |engine| engine.run(&request)).await
    }
}
