//! Overview dashboard
//!
//! Plans: `kpis`, `daily_revenue`, `top_products` (top 5 by revenue) and
//! `store_revenue`.

use crate::executor::ExecutorResult;
use crate::planner::{Pagination, QueryPlan, SortDirection};
use crate::result::{Money, OverviewDocument, RawRowsets, StoreRevenue, TopProduct};

use super::kpis::{self, DAILY_REVENUE, KPIS};
use super::request::AggregationRequest;

pub(crate) const TOP_PRODUCTS: &str = "top_products";
pub(crate) const STORE_REVENUE: &str = "store_revenue";

/// Number of entries in `top_produtos`
pub const TOP_PRODUCTS_LIMIT: u32 = 5;

pub(crate) fn plans(request: &AggregationRequest) -> Vec<QueryPlan> {
    let filter = request.filter();
    vec![
        kpis::kpi_plan(filter),
        kpis::daily_revenue_plan(filter),
        QueryPlan::compose(
            TOP_PRODUCTS,
            "p.id, p.name, COALESCE(SUM(ps.quantity), 0) AS quantidade, \
             COALESCE(SUM(ps.total_price), 0) AS receita",
            "product_sales ps \
             JOIN sales s ON ps.sale_id = s.id \
             JOIN products p ON ps.product_id = p.id",
            filter,
        )
        .group_by(&["p.id", "p.name"])
        .order_by("receita", SortDirection::Desc)
        .order_by("p.id", SortDirection::Asc)
        .paginate(Pagination::first(TOP_PRODUCTS_LIMIT)),
        QueryPlan::compose(
            STORE_REVENUE,
            "st.id, st.name, COALESCE(SUM(s.total_amount), 0) AS receita",
            "sales s JOIN stores st ON s.store_id = st.id",
            filter,
        )
        .group_by(&["st.id", "st.name"])
        .order_by("receita", SortDirection::Desc)
        .order_by("st.id", SortDirection::Asc),
    ]
}

pub(crate) fn assemble(rowsets: &RawRowsets) -> ExecutorResult<OverviewDocument> {
    let top_produtos = rowsets
        .rows(TOP_PRODUCTS)
        .iter()
        .map(|row| {
            Ok(TopProduct {
                produto: row.text_or(1, "-")?,
                quantidade: row.truncated_or_zero(2)?,
                receita: Money::new(row.decimal_or_zero(3)?),
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    let faturamento_lojas = rowsets
        .rows(STORE_REVENUE)
        .iter()
        .map(|row| {
            Ok(StoreRevenue {
                loja: row.text_or(1, "-")?,
                receita: Money::new(row.decimal_or_zero(2)?),
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    Ok(OverviewDocument {
        kpis: kpis::order_kpis(rowsets.first(KPIS))?,
        tendencia: kpis::daily_series(rowsets.rows(DAILY_REVENUE))?,
        top_produtos,
        faturamento_lojas,
    })
}
