//! Store units overview
//!
//! Sales are reduced to one row per store in the `store_sales` subquery,
//! where the sales-side filters apply. That table is LEFT JOINed to `stores`
//! and the status filter applies outside, so every store appears at most
//! once and stores without matching sales keep zero figures.

use rust_decimal::Decimal;

use crate::executor::{ExecutorResult, Row};
use crate::filter::StoreStatus;
use crate::planner::{Pagination, QueryPlan, Relation, SortDirection};
use crate::result::{
    AssemblyContext, IsoTimestamp, Money, RawRowsets, UnitEntry, UnitKpis, UnitsOverviewDocument,
};

use super::kpis::{average_ticket, SALES};
use super::request::AggregationRequest;

pub(crate) const STORE_SALES: &str = "store_sales";
pub(crate) const UNIT_KPIS: &str = "unit_kpis";
pub(crate) const UNIT_LISTING: &str = "unit_listing";

const STORES_WITH_SALES: &str = "stores st LEFT JOIN ({inner}) agg ON agg.store_id = st.id";

pub(crate) fn plans(request: &AggregationRequest) -> Vec<QueryPlan> {
    let (sales_filter, store_filter) = request.filter().split_store_side();

    let store_sales = QueryPlan::compose(
        STORE_SALES,
        "s.store_id, COALESCE(SUM(s.total_amount), 0) AS faturamento, \
         COUNT(*) AS pedidos, MAX(s.created_at) AS ultima_venda",
        SALES,
        &sales_filter,
    )
    .group_by(&["s.store_id"]);

    vec![
        QueryPlan::new(
            UNIT_KPIS,
            "COUNT(*) AS total_unidades, \
             COUNT(*) FILTER (WHERE st.is_active) AS unidades_ativas, \
             COALESCE(SUM(agg.faturamento), 0) AS faturamento_total, \
             COALESCE(SUM(agg.pedidos), 0) AS pedidos",
            Relation::derived(STORES_WITH_SALES, store_sales.clone()),
        )
        .filtered_by(&store_filter),
        QueryPlan::new(
            UNIT_LISTING,
            "st.id, st.name, st.is_active, \
             COALESCE(agg.faturamento, 0) AS faturamento, \
             COALESCE(agg.pedidos, 0) AS pedidos, agg.ultima_venda",
            Relation::derived(STORES_WITH_SALES, store_sales),
        )
        .filtered_by(&store_filter)
        .order_by("faturamento", SortDirection::Desc)
        .order_by("st.id", SortDirection::Asc)
        .paginate(request.pagination()),
    ]
}

pub(crate) fn assemble(
    context: &AssemblyContext,
    rowsets: &RawRowsets,
) -> ExecutorResult<UnitsOverviewDocument> {
    let kpis = match rowsets.first(UNIT_KPIS) {
        Some(row) => {
            let revenue = row.decimal_or_zero(2)?;
            UnitKpis {
                total_unidades: row.count(0)?,
                unidades_ativas: row.count(1)?,
                faturamento_total: Money::new(revenue),
                ticket_medio: average_ticket(revenue, row.count(3)?),
            }
        }
        None => UnitKpis::default(),
    };

    let unidades = rowsets
        .rows(UNIT_LISTING)
        .iter()
        .map(unit_entry)
        .collect::<ExecutorResult<Vec<_>>>()?;

    let total_registros = kpis.total_unidades;

    Ok(UnitsOverviewDocument {
        kpis,
        unidades,
        pagina: context.page,
        total_paginas: Pagination::total_pages(total_registros, context.limit),
        total_registros,
    })
}

fn unit_entry(row: &Row) -> ExecutorResult<UnitEntry> {
    let status = if row.flag(2)? {
        StoreStatus::Active
    } else {
        StoreStatus::Inactive
    };
    let revenue: Decimal = row.decimal_or_zero(3)?;
    let orders = row.count(4)?;

    Ok(UnitEntry {
        id: row.int(0)?,
        unidade: row.text_or(1, "")?,
        status: status.label(),
        faturamento: Money::new(revenue),
        ticket_medio: average_ticket(revenue, orders),
        pedidos: orders,
        ultima_venda: row.timestamp_opt(5)?.map(IsoTimestamp),
    })
}
