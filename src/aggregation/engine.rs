//! Aggregation engine
//!
//! Runs every plan of a request sequentially on a borrowed executor, keyed
//! by label, and hands the rowsets to the assembler. The first failing plan
//! ends the request; nothing partial is returned.

use uuid::Uuid;

use crate::error::AnalyticsResult;
use crate::executor::{ExecutorResult, QueryExecutor, Row};
use crate::observability::ObservationScope;
use crate::planner::QueryPlan;
use crate::result::{assemble, RawRowsets, ResultDocument};

use super::catalog;
use super::request::AggregationRequest;

/// Stateless engine over a borrowed executor
pub struct AnalyticsEngine<'a, E: QueryExecutor + ?Sized> {
    executor: &'a E,
}

impl<'a, E: QueryExecutor + ?Sized> AnalyticsEngine<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Execute the request's plans and assemble its document
    pub fn run(&self, request: &AggregationRequest) -> AnalyticsResult<ResultDocument> {
        let request_id = Uuid::new_v4().to_string();
        let scope = ObservationScope::with_fields(
            "AGGREGATION",
            &[
                ("kind", request.kind().as_str()),
                ("request_id", request_id.as_str()),
            ],
        );

        let result = self
            .execute_all(&request.plans(), &request_id)
            .and_then(|rowsets| assemble(request.kind(), &request.context(), &rowsets));

        match &result {
            Ok(_) => scope.complete(),
            Err(err) => scope.fail(&err.to_string()),
        }
        result
    }

    /// Plans for `request`, without executing them
    pub fn plans(&self, request: &AggregationRequest) -> Vec<QueryPlan> {
        request.plans()
    }

    /// Single catalog product
    pub fn product(&self, id: i64) -> AnalyticsResult<ResultDocument> {
        let plan = catalog::product_plan(id)?;
        let rows = self.execute_plan(&plan, &Uuid::new_v4().to_string())?;
        Ok(ResultDocument::Product(catalog::product_from_rows(id, &rows)?))
    }

    /// Store options ordered by name
    pub fn store_options(&self) -> AnalyticsResult<ResultDocument> {
        self.options(catalog::store_options_plan())
    }

    /// Channel options ordered by name
    pub fn channel_options(&self) -> AnalyticsResult<ResultDocument> {
        self.options(catalog::channel_options_plan())
    }

    fn options(&self, plan: QueryPlan) -> AnalyticsResult<ResultDocument> {
        let rows = self.execute_plan(&plan, &Uuid::new_v4().to_string())?;
        Ok(ResultDocument::Options(catalog::options_from_rows(&rows)?))
    }

    fn execute_all(&self, plans: &[QueryPlan], request_id: &str) -> AnalyticsResult<RawRowsets> {
        let mut rowsets = RawRowsets::new();
        for plan in plans {
            let rows = self.execute_plan(plan, request_id)?;
            rowsets.insert(plan.label(), rows);
        }
        Ok(rowsets)
    }

    fn execute_plan(&self, plan: &QueryPlan, request_id: &str) -> ExecutorResult<Vec<Row>> {
        let rendered = plan.render();
        let params = rendered.params.len().to_string();
        let scope = ObservationScope::with_fields(
            "PLAN",
            &[
                ("plan", plan.label()),
                ("params", params.as_str()),
                ("request_id", request_id),
            ],
        );

        match self.executor.execute(&rendered.sql, &rendered.params) {
            Ok(rows) => {
                scope.complete_with_fields(&[("rows", rows.len().to_string().as_str())]);
                Ok(rows)
            }
            Err(err) => {
                let err = err.in_plan(plan.label());
                scope.fail(err.cause());
                Err(err)
            }
        }
    }
}
